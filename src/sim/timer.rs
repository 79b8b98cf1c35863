//! Keyed timer registry
//!
//! Every timed behavior in the game (the 1 Hz clock, the spawners, combo and
//! multiplier windows, per-entity expiry) is an entry here, keyed by purpose
//! and cancellable independently. Scheduling a key that is already armed
//! replaces the old entry, so re-catching a double-points power-up restarts
//! its single reset timer instead of leaving a stale one behind. Clearing the
//! wheel on every state-resetting transition is what prevents orphaned
//! callbacks from firing against a new session.

/// Identifies what a timer is for. Entity-scoped keys carry the entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKey {
    /// 1 Hz session clock
    GameClock,
    /// Repeating heart spawner (period depends on level)
    HeartSpawner,
    /// Repeating power-up spawner
    PowerUpSpawner,
    /// Combo inactivity window
    ComboWindow,
    /// Double-points expiry
    MultiplierReset,
    /// Delay between time running out and the results screen
    FinishDelay,
    /// Uncaught heart expiry
    HeartExpiry(u32),
    /// Uncaught power-up expiry
    PowerUpExpiry(u32),
    /// Achievement toast removal
    ToastExpiry(u32),
    /// Catch explosion removal
    ExplosionExpiry(u32),
}

#[derive(Debug, Clone)]
struct Timer {
    key: TimerKey,
    deadline: u64,
    /// Re-armed with this period after firing, if set
    period: Option<u64>,
    /// Arm order, for deterministic firing of same-deadline timers
    seq: u64,
}

/// Registry of pending timers, keyed by [`TimerKey`].
///
/// Entry count stays small (a handful of fixed keys plus one expiry per live
/// entity), so a plain vector with linear scans is fine.
#[derive(Debug, Clone, Default)]
pub struct TimerWheel {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl TimerWheel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer. Replaces any existing timer with the same key.
    pub fn schedule(&mut self, key: TimerKey, now: u64, delay: u64) {
        self.cancel(key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            key,
            deadline: now + delay,
            period: None,
            seq,
        });
    }

    /// Arm a repeating timer that first fires after one full period.
    pub fn schedule_repeating(&mut self, key: TimerKey, now: u64, period: u64) {
        debug_assert!(period > 0);
        self.cancel(key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            key,
            deadline: now + period,
            period: Some(period),
            seq,
        });
    }

    /// Disarm a timer. No-op if the key is not armed.
    pub fn cancel(&mut self, key: TimerKey) {
        self.timers.retain(|t| t.key != key);
    }

    /// Disarm every timer matching the predicate.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(TimerKey) -> bool) {
        self.timers.retain(|t| !pred(t.key));
    }

    /// Disarm everything (session reset / teardown).
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_armed(&self, key: TimerKey) -> bool {
        self.timers.iter().any(|t| t.key == key)
    }

    /// Ticks until the key fires, if armed (for tests and HUD).
    pub fn remaining(&self, key: TimerKey, now: u64) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.deadline.saturating_sub(now))
    }

    /// Pop every timer due at or before `now`, in deterministic order
    /// (deadline, then arm order). Repeating timers are re-armed.
    pub fn fire(&mut self, now: u64) -> Vec<TimerKey> {
        let mut due: Vec<Timer> = Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].deadline <= now {
                due.push(self.timers.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|t| (t.deadline, t.seq));

        let keys: Vec<TimerKey> = due.iter().map(|t| t.key).collect();
        for mut t in due {
            if let Some(period) = t.period {
                t.deadline = now + period;
                self.timers.push(t);
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut wheel = TimerWheel::new();
        wheel.schedule(TimerKey::FinishDelay, 0, 10);
        assert!(wheel.fire(9).is_empty());
        assert_eq!(wheel.fire(10), vec![TimerKey::FinishDelay]);
        assert!(wheel.fire(20).is_empty());
    }

    #[test]
    fn test_repeating_rearms() {
        let mut wheel = TimerWheel::new();
        wheel.schedule_repeating(TimerKey::GameClock, 0, 60);
        assert_eq!(wheel.fire(60), vec![TimerKey::GameClock]);
        assert_eq!(wheel.fire(120), vec![TimerKey::GameClock]);
        assert!(wheel.is_armed(TimerKey::GameClock));
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut wheel = TimerWheel::new();
        wheel.schedule(TimerKey::MultiplierReset, 0, 100);
        // Re-catch: restart the window from tick 50
        wheel.schedule(TimerKey::MultiplierReset, 50, 100);
        assert!(wheel.fire(100).is_empty());
        assert_eq!(wheel.fire(150), vec![TimerKey::MultiplierReset]);
    }

    #[test]
    fn test_cancel_where_entity_keys() {
        let mut wheel = TimerWheel::new();
        wheel.schedule(TimerKey::HeartExpiry(1), 0, 10);
        wheel.schedule(TimerKey::HeartExpiry(2), 0, 10);
        wheel.schedule(TimerKey::ComboWindow, 0, 10);
        wheel.cancel_where(|k| matches!(k, TimerKey::HeartExpiry(_)));
        assert_eq!(wheel.fire(10), vec![TimerKey::ComboWindow]);
    }

    #[test]
    fn test_same_deadline_fires_in_arm_order() {
        let mut wheel = TimerWheel::new();
        wheel.schedule(TimerKey::HeartExpiry(7), 0, 5);
        wheel.schedule(TimerKey::PowerUpExpiry(3), 0, 5);
        assert_eq!(
            wheel.fire(5),
            vec![TimerKey::HeartExpiry(7), TimerKey::PowerUpExpiry(3)]
        );
    }
}
