//! WebGPU rendering

mod heart_pipeline;

pub use heart_pipeline::HeartRenderState;
