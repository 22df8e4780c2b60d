//! Gravity clock - turns elapsed wall time into gravity ticks.
//!
//! The front-end feeds it the milliseconds since the last frame; it answers
//! how many gravity steps are due. Leftover time carries over, so a slow
//! frame produces several ticks instead of losing them.

use crate::types::BASE_DROP_MS;

/// Upper bound on ticks reported by one update (after a stall or a pause)
const MAX_TICKS_PER_UPDATE: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct GravityClock {
    interval_ms: u32,
    accumulator_ms: u32,
}

impl GravityClock {
    /// Clock ticking every `interval_ms` (a zero interval is treated as 1ms)
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            accumulator_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Follow a new interval without dropping the time already accumulated
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
    }

    /// Add elapsed time; returns the number of gravity ticks now due
    pub fn update(&mut self, elapsed_ms: u32) -> u32 {
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);

        let due = self.accumulator_ms / self.interval_ms;
        self.accumulator_ms %= self.interval_ms;
        due.min(MAX_TICKS_PER_UPDATE)
    }

    /// Milliseconds until the next tick is due
    pub fn until_next_ms(&self) -> u32 {
        self.interval_ms.saturating_sub(self.accumulator_ms)
    }

    pub fn reset(&mut self) {
        self.accumulator_ms = 0;
    }
}

impl Default for GravityClock {
    fn default() -> Self {
        Self::new(BASE_DROP_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut clock = GravityClock::new(0);
        assert_eq!(clock.interval_ms(), 1);
        assert_eq!(clock.update(5), 5);
        clock.set_interval(0);
        assert_eq!(clock.interval_ms(), 1);
    }

    #[test]
    fn test_update_accumulates() {
        let mut clock = GravityClock::new(1000);
        assert_eq!(clock.update(400), 0);
        assert_eq!(clock.update(400), 0);
        assert_eq!(clock.until_next_ms(), 200);
        assert_eq!(clock.update(400), 1);
        assert_eq!(clock.until_next_ms(), 800);
    }

    #[test]
    fn test_slow_frame_yields_several_ticks() {
        let mut clock = GravityClock::new(500);
        assert_eq!(clock.update(1250), 2);
        assert_eq!(clock.update(250), 1);
    }

    #[test]
    fn test_ticks_per_update_are_capped() {
        let mut clock = GravityClock::new(1000);
        assert_eq!(clock.update(60_000), MAX_TICKS_PER_UPDATE);
    }

    #[test]
    fn test_reset_drops_accumulated_time() {
        let mut clock = GravityClock::default();
        clock.update(900);
        clock.reset();
        assert_eq!(clock.update(900), 0);
    }

    #[test]
    fn test_set_interval_keeps_accumulator() {
        let mut clock = GravityClock::new(1000);
        clock.update(600);
        clock.set_interval(500);
        assert_eq!(clock.interval_ms(), 500);
        assert_eq!(clock.update(0), 1);
    }
}
