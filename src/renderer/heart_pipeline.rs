//! SDF-based WebGPU render pipeline
//!
//! Renders the entire play-area scene in the fragment shader using signed
//! distance fields: drifting backdrop hearts, catchable hearts, power-up
//! badges, catch explosions, particles, and the cursor glow. The DOM owns
//! text (HUD, toasts, screens); the canvas owns everything that moves.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::consts::MAX_PARTICLES;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Maximum hearts on screen
const MAX_HEARTS: usize = 64;
/// Maximum power-ups on screen
const MAX_POWER_UPS: usize = 16;
/// Maximum simultaneous catch explosions
const MAX_EXPLOSIONS: usize = 32;
/// Backdrop field size
const MAX_BACKDROP: usize = 32;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2],  // offset 0
    time: f32,             // offset 8
    phase: u32,            // offset 12 - 0=idle 1=playing 2=finished 3=revealed
    heart_count: u32,      // offset 16
    power_up_count: u32,   // offset 20
    explosion_count: u32,  // offset 24
    particle_count: u32,   // offset 28
    cursor: [f32; 2],      // offset 32 (8-byte aligned for WGSL vec2)
    backdrop_count: u32,   // offset 40
    flags: u32,            // offset 44 - bit0=backdrop_anim, bit1=golden_pulse
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct HeartData {
    pos: [f32; 2],
    size: f32,
    kind: u32,     // palette index, 0=pink 1=rose 2=fuchsia 3=golden
    progress: f32, // 0-1 through the lifetime, drives pop-in and fade-out
    _pad: [u32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct PowerUpData {
    pos: [f32; 2],
    kind: u32,      // 0=DoublePoints 1=TimeBonus 2=Magnet 3=FlatBonus
    ttl_ratio: f32, // 0-1 remaining, for the expiry pulse
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ExplosionData {
    pos: [f32; 2],
    color: u32,
    progress: f32, // 0-1 through the burst
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ParticleData {
    pos: [f32; 2],
    size: f32,
    life: f32,
    color: u32,
    vel_x: f32,
    vel_y: f32,
    _pad: u32,
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct BackdropData {
    x_frac: f32,
    speed: f32,
    phase: f32,
    size: f32,
    palette: u32,
    _pad: [u32; 3],
}

// ============================================================================
// RENDER STATE
// ============================================================================

pub struct HeartRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    hearts_buffer: wgpu::Buffer,
    power_ups_buffer: wgpu::Buffer,
    explosions_buffer: wgpu::Buffer,
    particles_buffer: wgpu::Buffer,
    backdrop_buffer: wgpu::Buffer,

    bind_group: wgpu::BindGroup,

    pub size: (u32, u32),
}

impl HeartRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("heart-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("heart_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("heart_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: [width as f32, height as f32],
                time: 0.0,
                phase: 0,
                heart_count: 0,
                power_up_count: 0,
                explosion_count: 0,
                particle_count: 0,
                cursor: [0.0, 0.0],
                backdrop_count: 0,
                flags: 0,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let hearts_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("hearts"),
            size: (std::mem::size_of::<HeartData>() * MAX_HEARTS) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let power_ups_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("power_ups"),
            size: (std::mem::size_of::<PowerUpData>() * MAX_POWER_UPS) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let explosions_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("explosions"),
            size: (std::mem::size_of::<ExplosionData>() * MAX_EXPLOSIONS) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let particles_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particles"),
            size: (std::mem::size_of::<ParticleData>() * MAX_PARTICLES) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let backdrop_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("backdrop"),
            size: (std::mem::size_of::<BackdropData>() * MAX_BACKDROP) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("heart_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 5,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("heart_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: hearts_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: power_ups_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: explosions_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: particles_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: backdrop_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("heart_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("heart_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            hearts_buffer,
            power_ups_buffer,
            explosions_buffer,
            particles_buffer,
            backdrop_buffer,
            bind_group,
            size: (width, height),
        }
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Update GPU buffers from game state and render
    pub fn render(
        &mut self,
        state: &GameState,
        settings: &Settings,
        time: f64,
    ) -> Result<(), wgpu::SurfaceError> {
        // time is ms since page load from requestAnimationFrame
        let elapsed = (time / 1000.0) as f32;
        let now = state.time_ticks;

        let heart_count = state.hearts.len().min(MAX_HEARTS) as u32;
        let power_up_count = state.power_ups.len().min(MAX_POWER_UPS) as u32;
        let explosion_count = state.explosions.len().min(MAX_EXPLOSIONS) as u32;

        let max_particles = settings.max_particles().min(MAX_PARTICLES);
        let trail_enabled = settings.effective_cursor_trail();
        let particle_count = state
            .particles
            .iter()
            .filter(|p| trail_enabled || !p.from_trail)
            .take(max_particles)
            .count() as u32;

        let backdrop_count = if settings.quality.backdrop_enabled() {
            state.backdrop.len().min(MAX_BACKDROP) as u32
        } else {
            0
        };

        let mut flags = 0u32;
        if settings.effective_backdrop() {
            flags |= 1;
        }
        if settings.golden_pulse {
            flags |= 2;
        }

        let phase = match state.phase {
            GamePhase::Idle => 0u32,
            GamePhase::Playing => 1,
            GamePhase::Finished => 2,
            GamePhase::Revealed => 3,
        };

        let globals = Globals {
            resolution: [self.size.0 as f32, self.size.1 as f32],
            time: elapsed,
            phase,
            heart_count,
            power_up_count,
            explosion_count,
            particle_count,
            cursor: [state.cursor.x, state.cursor.y],
            backdrop_count,
            flags,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let mut hearts_data = vec![HeartData::zeroed(); MAX_HEARTS];
        for (i, heart) in state.hearts.iter().take(MAX_HEARTS).enumerate() {
            let age = now.saturating_sub(heart.spawned_at) as f32;
            hearts_data[i] = HeartData {
                pos: [heart.pos.x, heart.pos.y],
                size: heart.size,
                kind: heart.kind.palette(),
                progress: (age / heart.ttl_ticks.max(1) as f32).min(1.0),
                _pad: [0; 3],
            };
        }
        self.queue
            .write_buffer(&self.hearts_buffer, 0, bytemuck::cast_slice(&hearts_data));

        let mut power_ups_data = vec![PowerUpData::zeroed(); MAX_POWER_UPS];
        for (i, power_up) in state.power_ups.iter().take(MAX_POWER_UPS).enumerate() {
            let age = now.saturating_sub(power_up.spawned_at) as f32;
            let ttl = crate::consts::POWER_UP_TTL_TICKS as f32;
            power_ups_data[i] = PowerUpData {
                pos: [power_up.pos.x, power_up.pos.y],
                kind: power_up.kind.palette(),
                ttl_ratio: (1.0 - age / ttl).clamp(0.0, 1.0),
            };
        }
        self.queue.write_buffer(
            &self.power_ups_buffer,
            0,
            bytemuck::cast_slice(&power_ups_data),
        );

        let mut explosions_data = vec![ExplosionData::zeroed(); MAX_EXPLOSIONS];
        for (i, explosion) in state.explosions.iter().take(MAX_EXPLOSIONS).enumerate() {
            let age = now.saturating_sub(explosion.spawned_at) as f32;
            explosions_data[i] = ExplosionData {
                pos: [explosion.pos.x, explosion.pos.y],
                color: explosion.color,
                progress: (age / crate::consts::EXPLOSION_TICKS as f32).min(1.0),
            };
        }
        self.queue.write_buffer(
            &self.explosions_buffer,
            0,
            bytemuck::cast_slice(&explosions_data),
        );

        let mut particles_data = vec![ParticleData::zeroed(); MAX_PARTICLES];
        let visible_particles = state
            .particles
            .iter()
            .filter(|p| trail_enabled || !p.from_trail);
        for (i, particle) in visible_particles.take(max_particles).enumerate() {
            particles_data[i] = ParticleData {
                pos: [particle.pos.x, particle.pos.y],
                size: particle.size,
                life: particle.life,
                color: particle.color,
                vel_x: particle.vel.x,
                vel_y: particle.vel.y,
                _pad: 0,
            };
        }
        self.queue.write_buffer(
            &self.particles_buffer,
            0,
            bytemuck::cast_slice(&particles_data),
        );

        let mut backdrop_data = vec![BackdropData::zeroed(); MAX_BACKDROP];
        for (i, bh) in state.backdrop.iter().take(MAX_BACKDROP).enumerate() {
            backdrop_data[i] = BackdropData {
                x_frac: bh.x_frac,
                speed: bh.speed,
                phase: bh.phase,
                size: bh.size,
                palette: bh.palette,
                _pad: [0; 3],
            };
        }
        self.queue.write_buffer(
            &self.backdrop_buffer,
            0,
            bytemuck::cast_slice(&backdrop_data),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("heart_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("heart_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
