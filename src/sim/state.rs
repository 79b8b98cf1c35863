//! Game state and core entity types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of the session.
///
/// Transitions are one-directional: Idle -> Playing -> Finished -> Revealed.
/// The only way back is the explicit replay reset in [`super::tick::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Intro screen, nothing spawning
    Idle,
    /// Active 30-second session
    Playing,
    /// Results screen (rank + gift box)
    Finished,
    /// Final message card
    Revealed,
}

/// Heart tiers, rarest first. Probability bands: top 5% golden, next 10%
/// fuchsia, next 25% rose, remainder pink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartKind {
    Golden,
    Fuchsia,
    Rose,
    Pink,
}

impl HeartKind {
    pub fn points(self) -> u32 {
        match self {
            HeartKind::Golden => 10,
            HeartKind::Fuchsia => 3,
            HeartKind::Rose | HeartKind::Pink => 1,
        }
    }

    /// Display color (CSS hex, also mirrored in the shader palette)
    pub fn color(self) -> &'static str {
        match self {
            HeartKind::Golden => "#ffd700",
            HeartKind::Fuchsia => "#ff1493",
            HeartKind::Rose => "#ff69b4",
            HeartKind::Pink => "#ff6b9d",
        }
    }

    /// Palette index used by the renderer
    pub fn palette(self) -> u32 {
        match self {
            HeartKind::Golden => 3,
            HeartKind::Fuchsia => 2,
            HeartKind::Rose => 1,
            HeartKind::Pink => 0,
        }
    }
}

/// A catchable heart
#[derive(Debug, Clone)]
pub struct Heart {
    pub id: u32,
    /// Center position, play-area pixels
    pub pos: Vec2,
    /// Bounding-box edge in pixels (hit-test box and visual size)
    pub size: f32,
    pub kind: HeartKind,
    /// Tick the heart appeared (for pop-in animation)
    pub spawned_at: u64,
    /// Full lifetime in ticks (for the fade-out ramp)
    pub ttl_ticks: u64,
}

impl Heart {
    /// Axis-aligned bounding-box hit test, matching click-time geometry
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size / 2.0;
        (point.x - self.pos.x).abs() <= half && (point.y - self.pos.y).abs() <= half
    }
}

/// Power-up pickups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// 2x score multiplier for 5 seconds
    DoublePoints,
    /// +5 seconds on the clock
    TimeBonus,
    /// Instantly catch up to 5 active hearts
    Magnet,
    /// Flat +20 points
    FlatBonus,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::DoublePoints,
        PowerUpKind::TimeBonus,
        PowerUpKind::Magnet,
        PowerUpKind::FlatBonus,
    ];

    /// HUD indicator text
    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::DoublePoints => "⚡ DOUBLE POINTS !",
            PowerUpKind::TimeBonus => "❄️ TEMPS GELÉ !",
            PowerUpKind::Magnet => "🧲 AIMANT ACTIF !",
            PowerUpKind::FlatBonus => "💰 BONUS +20 !",
        }
    }

    /// Palette index used by the renderer
    pub fn palette(self) -> u32 {
        match self {
            PowerUpKind::DoublePoints => 0,
            PowerUpKind::TimeBonus => 1,
            PowerUpKind::Magnet => 2,
            PowerUpKind::FlatBonus => 3,
        }
    }
}

/// A spawned power-up waiting to be caught
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub spawned_at: u64,
}

impl PowerUp {
    pub fn contains(&self, point: Vec2) -> bool {
        let half = POWER_UP_SIZE / 2.0;
        (point.x - self.pos.x).abs() <= half && (point.y - self.pos.y).abs() <= half
    }
}

/// Achievement toast, displayed 3 seconds, insertion order preserved
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u32,
    pub text: String,
}

/// Catch feedback burst, removed after 0.6 seconds
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    /// Palette index (heart tier, or golden for power-ups)
    pub color: u32,
    pub spawned_at: u64,
}

/// Short-lived visual particle (cursor trail and catch bursts)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
    /// Trail particles count against the smaller trail cap
    pub from_trail: bool,
}

/// Decorative floating heart, generated once per page visit
#[derive(Debug, Clone)]
pub struct BackdropHeart {
    /// Horizontal position as a fraction of the viewport
    pub x_frac: f32,
    /// Rise speed as viewport fractions per second
    pub speed: f32,
    /// Initial vertical offset fraction (staggers the field)
    pub phase: f32,
    pub size: f32,
    pub palette: u32,
}

/// Complete session state. All mutation goes through `sim::tick`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub(crate) rng: Pcg32,

    pub phase: GamePhase,
    pub score: u32,
    pub combo: u32,
    /// Highest combo this session, shown on the results screen
    pub best_combo: u32,
    /// Always 1 or 2
    pub multiplier: u32,
    pub level: u32,
    /// Seconds on the clock
    pub time_left: u32,
    /// Simulation tick counter (monotonic across the whole visit)
    pub time_ticks: u64,

    pub hearts: Vec<Heart>,
    pub power_ups: Vec<PowerUp>,
    pub toasts: Vec<Toast>,
    pub explosions: Vec<Explosion>,
    pub particles: Vec<Particle>,
    pub backdrop: Vec<BackdropHeart>,

    /// Last caught power-up, shown in the HUD indicator
    pub active_power_up: Option<PowerUpKind>,
    /// Tracked pointer position, play-area pixels
    pub cursor: Vec2,
    /// Play-area size in pixels (set from the canvas client size)
    pub area: Vec2,

    pub timers: super::timer::TimerWheel,
    next_id: u32,
}

impl GameState {
    /// Create the idle state for a fresh page visit
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            combo: 0,
            best_combo: 0,
            multiplier: 1,
            level: 1,
            time_left: SESSION_SECS,
            time_ticks: 0,
            hearts: Vec::new(),
            power_ups: Vec::new(),
            toasts: Vec::new(),
            explosions: Vec::new(),
            particles: Vec::new(),
            backdrop: Vec::new(),
            active_power_up: None,
            cursor: Vec2::ZERO,
            area: Vec2::new(800.0, 600.0),
            timers: super::timer::TimerWheel::new(),
            next_id: 1,
        };
        state.generate_backdrop();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Decorative floating hearts behind every screen
    fn generate_backdrop(&mut self) {
        self.backdrop.clear();
        for _ in 0..BACKDROP_HEARTS {
            let x_frac = self.rng.random::<f32>();
            let speed = 1.0 / (6.0 + self.rng.random::<f32>() * 4.0);
            let phase = self.rng.random::<f32>();
            let size = 15.0 + self.rng.random::<f32>() * 35.0;
            let palette = self.rng.random_range(0..3u32);
            self.backdrop.push(BackdropHeart {
                x_frac,
                speed,
                phase,
                size,
                palette,
            });
        }
    }

    /// Append an achievement toast and arm its removal timer
    pub fn push_toast(&mut self, text: impl Into<String>) {
        let id = self.next_entity_id();
        self.toasts.push(Toast {
            id,
            text: text.into(),
        });
        let now = self.time_ticks;
        self.timers
            .schedule(super::timer::TimerKey::ToastExpiry(id), now, TOAST_TICKS);
    }

    /// Catch feedback: explosion entity plus a radial particle burst
    pub fn spawn_burst(&mut self, pos: Vec2, color: u32, count: usize) {
        let id = self.next_entity_id();
        let now = self.time_ticks;
        self.explosions.push(Explosion {
            id,
            pos,
            color,
            spawned_at: now,
        });
        self.timers.schedule(
            super::timer::TimerKey::ExplosionExpiry(id),
            now,
            EXPLOSION_TICKS,
        );

        for i in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let angle = std::f32::consts::TAU * (i as f32) / (count as f32);
            let speed = 90.0 + self.rng.random::<f32>() * 40.0;
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                life: 1.0,
                size: 4.0 + self.rng.random::<f32>() * 3.0,
                from_trail: false,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_hit_test_is_bounding_box() {
        let heart = Heart {
            id: 1,
            pos: Vec2::new(100.0, 100.0),
            size: 40.0,
            kind: HeartKind::Pink,
            spawned_at: 0,
            ttl_ticks: 120,
        };
        assert!(heart.contains(Vec2::new(100.0, 100.0)));
        assert!(heart.contains(Vec2::new(119.0, 81.0)));
        assert!(!heart.contains(Vec2::new(121.0, 100.0)));
        assert!(!heart.contains(Vec2::new(100.0, 121.0)));
    }

    #[test]
    fn test_new_state_is_idle_with_backdrop() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.time_left, SESSION_SECS);
        assert_eq!(state.backdrop.len(), BACKDROP_HEARTS);
        assert!(state.hearts.is_empty());
    }

    #[test]
    fn test_power_up_indicator_labels() {
        assert_eq!(PowerUpKind::DoublePoints.label(), "⚡ DOUBLE POINTS !");
        assert_eq!(PowerUpKind::TimeBonus.label(), "❄️ TEMPS GELÉ !");
        assert_eq!(PowerUpKind::Magnet.label(), "🧲 AIMANT ACTIF !");
        assert_eq!(PowerUpKind::FlatBonus.label(), "💰 BONUS +20 !");
    }

    #[test]
    fn test_points_per_kind() {
        assert_eq!(HeartKind::Golden.points(), 10);
        assert_eq!(HeartKind::Fuchsia.points(), 3);
        assert_eq!(HeartKind::Rose.points(), 1);
        assert_eq!(HeartKind::Pink.points(), 1);
    }
}
