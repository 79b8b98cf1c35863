//! Spawn tables and level scaling
//!
//! Heart tier and power-up kind come from explicit weighted tables; intervals
//! and lifetimes shrink as the level rises, with fixed floors.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Heart, HeartKind, PowerUp, PowerUpKind};
use super::timer::TimerKey;
use crate::consts::*;
use crate::ms_to_ticks;

/// Heart spawner period for a level: 800 ms shrinking 100 ms per level,
/// floored at 400 ms.
pub fn heart_spawn_interval_ticks(level: u32) -> u64 {
    let ms = 800u32.saturating_sub(level.saturating_mul(100)).max(400);
    ms_to_ticks(ms)
}

/// Heart lifetime for a level: 2000 ms shrinking 100 ms per level, floored
/// at 1200 ms.
pub fn heart_ttl_ticks(level: u32) -> u64 {
    let ms = 2000u32.saturating_sub(level.saturating_mul(100)).max(1200);
    ms_to_ticks(ms)
}

/// Draw a heart tier from the fixed probability bands
fn roll_heart_kind(roll: f32) -> HeartKind {
    if roll > 0.95 {
        HeartKind::Golden
    } else if roll > 0.85 {
        HeartKind::Fuchsia
    } else if roll > 0.60 {
        HeartKind::Rose
    } else {
        HeartKind::Pink
    }
}

/// Random point inside the safe region: x 10-90%, y 10-80% of the play area
fn roll_position(state: &mut GameState) -> Vec2 {
    let x_frac = 0.10 + state.rng.random::<f32>() * 0.80;
    let y_frac = 0.10 + state.rng.random::<f32>() * 0.70;
    Vec2::new(x_frac * state.area.x, y_frac * state.area.y)
}

/// Spawn one heart and arm its expiry timer
pub fn spawn_heart(state: &mut GameState) {
    let roll = state.rng.random::<f32>();
    let kind = roll_heart_kind(roll);
    let pos = roll_position(state);
    let size = HEART_MIN_SIZE + state.rng.random::<f32>() * HEART_SIZE_SPREAD;
    let ttl = heart_ttl_ticks(state.level);

    let id = state.next_entity_id();
    let now = state.time_ticks;
    state.hearts.push(Heart {
        id,
        pos,
        size,
        kind,
        spawned_at: now,
        ttl_ticks: ttl,
    });
    state.timers.schedule(TimerKey::HeartExpiry(id), now, ttl);
}

/// One power-up spawner fire: 30% chance of a uniformly random kind
pub fn maybe_spawn_power_up(state: &mut GameState) {
    if state.rng.random::<f32>() >= POWER_UP_CHANCE {
        return;
    }
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let pos = roll_position(state);

    let id = state.next_entity_id();
    let now = state.time_ticks;
    state.power_ups.push(PowerUp {
        id,
        pos,
        kind,
        spawned_at: now,
    });
    state
        .timers
        .schedule(TimerKey::PowerUpExpiry(id), now, POWER_UP_TTL_TICKS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_interval_shrinks_with_floor() {
        assert_eq!(heart_spawn_interval_ticks(1), ms_to_ticks(700));
        assert_eq!(heart_spawn_interval_ticks(2), ms_to_ticks(600));
        assert_eq!(heart_spawn_interval_ticks(4), ms_to_ticks(400));
        // Floor at 400 ms from level 4 on
        assert_eq!(heart_spawn_interval_ticks(10), ms_to_ticks(400));
    }

    #[test]
    fn test_ttl_shrinks_with_floor() {
        assert_eq!(heart_ttl_ticks(1), ms_to_ticks(1900));
        assert_eq!(heart_ttl_ticks(8), ms_to_ticks(1200));
        assert_eq!(heart_ttl_ticks(30), ms_to_ticks(1200));
    }

    #[test]
    fn test_heart_kind_bands() {
        assert_eq!(roll_heart_kind(0.96), HeartKind::Golden);
        assert_eq!(roll_heart_kind(0.95), HeartKind::Fuchsia);
        assert_eq!(roll_heart_kind(0.86), HeartKind::Fuchsia);
        assert_eq!(roll_heart_kind(0.85), HeartKind::Rose);
        assert_eq!(roll_heart_kind(0.61), HeartKind::Rose);
        assert_eq!(roll_heart_kind(0.60), HeartKind::Pink);
        assert_eq!(roll_heart_kind(0.0), HeartKind::Pink);
    }

    #[test]
    fn test_spawned_hearts_stay_in_safe_region() {
        let mut state = GameState::new(7);
        state.area = Vec2::new(1000.0, 1000.0);
        for _ in 0..200 {
            spawn_heart(&mut state);
        }
        for heart in &state.hearts {
            assert!(heart.pos.x >= 100.0 && heart.pos.x <= 900.0);
            assert!(heart.pos.y >= 100.0 && heart.pos.y <= 800.0);
            assert!(heart.size >= HEART_MIN_SIZE);
            assert!(heart.size <= HEART_MIN_SIZE + HEART_SIZE_SPREAD);
            assert!(state.timers.is_armed(TimerKey::HeartExpiry(heart.id)));
        }
    }

    #[test]
    fn test_power_up_spawn_chance_roughly_30_percent() {
        let mut state = GameState::new(99);
        for _ in 0..1000 {
            maybe_spawn_power_up(&mut state);
        }
        let n = state.power_ups.len();
        assert!((200..400).contains(&n), "spawned {n} of 1000");
    }
}
