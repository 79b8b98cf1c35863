//! Coeur Rush - a Valentine catch-the-hearts mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timers, spawning, scoring, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Quality presets and effect toggles

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game tuning constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation ticks per second (inverse of SIM_DT)
    pub const TICKS_PER_SEC: u64 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Session length in seconds
    pub const SESSION_SECS: u32 = 30;
    /// Delay between the clock hitting zero and the results screen (ticks)
    pub const FINISH_DELAY_TICKS: u64 = 2 * TICKS_PER_SEC;

    /// Combo inactivity window (1.5 s)
    pub const COMBO_WINDOW_TICKS: u64 = 3 * TICKS_PER_SEC / 2;
    /// Double-points duration (5 s)
    pub const MULTIPLIER_TICKS: u64 = 5 * TICKS_PER_SEC;
    /// Achievement toast display time (3 s)
    pub const TOAST_TICKS: u64 = 3 * TICKS_PER_SEC;
    /// Explosion display time (0.6 s)
    pub const EXPLOSION_TICKS: u64 = 3 * TICKS_PER_SEC / 5;

    /// Power-up spawner period (5 s)
    pub const POWER_UP_SPAWN_TICKS: u64 = 5 * TICKS_PER_SEC;
    /// Power-up lifetime if uncaught (4 s)
    pub const POWER_UP_TTL_TICKS: u64 = 4 * TICKS_PER_SEC;
    /// Chance that a power-up spawner fire actually spawns one
    pub const POWER_UP_CHANCE: f32 = 0.3;

    /// Seconds added by a golden heart
    pub const GOLDEN_TIME_BONUS: u32 = 3;
    /// Seconds added by the time-bonus power-up
    pub const TIME_BONUS_SECS: u32 = 5;
    /// Flat score from the bonus power-up
    pub const FLAT_BONUS_POINTS: u32 = 20;
    /// Hearts vacuumed by the magnet power-up
    pub const MAGNET_BATCH: usize = 5;

    /// Heart size range in pixels (min + random extra)
    pub const HEART_MIN_SIZE: f32 = 35.0;
    pub const HEART_SIZE_SPREAD: f32 = 25.0;
    /// Power-up hit box edge in pixels
    pub const POWER_UP_SIZE: f32 = 40.0;

    /// Cursor-trail particle cap
    pub const MAX_TRAIL_PARTICLES: usize = 20;
    /// Global particle cap
    pub const MAX_PARTICLES: usize = 256;
    /// Decorative background hearts generated per visit
    pub const BACKDROP_HEARTS: usize = 30;
}

/// Convert a duration in milliseconds to simulation ticks (min 1)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    ((ms as u64 * consts::TICKS_PER_SEC) / 1000).max(1)
}
