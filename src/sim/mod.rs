//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - All timed behavior through the keyed timer registry
//! - No rendering or platform dependencies

pub mod rank;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use rank::{Rank, rank_for_score};
pub use spawn::{heart_spawn_interval_ticks, heart_ttl_ticks};
pub use state::{
    BackdropHeart, Explosion, GamePhase, GameState, Heart, HeartKind, Particle, PowerUp,
    PowerUpKind, Toast,
};
pub use tick::{TickInput, tick};
pub use timer::{TimerKey, TimerWheel};
