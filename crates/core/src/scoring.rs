//! Scoring module - score, level and speed
//!
//! Compatibility note:
//! The reference rules award a flat amount per *clear event*, however many
//! rows that event removed. [`ScoringPolicy::PerLine`] is the opt-in
//! alternative that multiplies the award by the row count.
//!
//! Level and speed are derived from the score alone:
//! - `level = 1 + score / threshold`
//! - `speed = 1.0 + 0.1 * (level - 1)`
//!
//! The engine never sleeps; a front-end reads [`ScoreTracker::gravity_interval_ms`]
//! to pace its gravity ticks.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::types::{BASE_DROP_MS, LEVEL_SCORE_THRESHOLD, SCORE_PER_CLEAR, SPEED_STEP};

/// How a clear event is turned into points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScoringPolicy {
    /// Fixed award per clear event
    #[default]
    Flat,
    /// Fixed award per cleared row
    PerLine,
}

impl ScoringPolicy {
    /// Parse from `"flat"` or `"per-line"` (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Some(ScoringPolicy::Flat),
            "per-line" | "perline" | "per_line" => Some(ScoringPolicy::PerLine),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringPolicy::Flat => "flat",
            ScoringPolicy::PerLine => "per-line",
        }
    }
}

/// Outcome of one clear event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    pub leveled_up: bool,
}

/// Level for a score
pub fn level_for_score(score: u32, threshold: u32) -> u32 {
    1 + score / threshold.max(1)
}

/// Speed multiplier for a level (1.0 at level 1)
pub fn speed_multiplier(level: u32) -> f64 {
    1.0 + SPEED_STEP * level.saturating_sub(1) as f64
}

/// Gravity interval for a level, in milliseconds
pub fn gravity_interval_ms(level: u32) -> u32 {
    ((BASE_DROP_MS as f64 / speed_multiplier(level)).round() as u32).max(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    lines: u32,
    clear_events: u32,
    per_clear: u32,
    threshold: u32,
    policy: ScoringPolicy,
}

impl ScoreTracker {
    pub fn new(per_clear: u32, threshold: u32, policy: ScoringPolicy) -> Self {
        Self {
            score: 0,
            lines: 0,
            clear_events: 0,
            per_clear,
            threshold: threshold.max(1),
            policy,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.score_per_clear, config.level_threshold, config.scoring)
    }

    /// Points a clear of `count` rows is worth under the current policy
    pub fn points_for(&self, count: usize) -> u32 {
        match (self.policy, count) {
            (_, 0) => 0,
            (ScoringPolicy::Flat, _) => self.per_clear,
            (ScoringPolicy::PerLine, n) => self.per_clear.saturating_mul(n as u32),
        }
    }

    /// Record a clear event. A count of zero is not an event.
    pub fn on_rows_cleared(&mut self, count: usize) -> ScoreResult {
        if count == 0 {
            return ScoreResult::default();
        }
        let before = self.level();
        let points = self.points_for(count);

        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(count as u32);
        self.clear_events = self.clear_events.saturating_add(1);

        ScoreResult {
            points,
            leveled_up: self.level() > before,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        level_for_score(self.score, self.threshold)
    }

    /// Total rows removed
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn clear_events(&self) -> u32 {
        self.clear_events
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    pub fn speed_multiplier(&self) -> f64 {
        speed_multiplier(self.level())
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level())
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.lines = 0;
        self.clear_events = 0;
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new(SCORE_PER_CLEAR, LEVEL_SCORE_THRESHOLD, ScoringPolicy::Flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_policy_ignores_row_count() {
        let mut tracker = ScoreTracker::default();
        assert_eq!(tracker.on_rows_cleared(1).points, 100);
        assert_eq!(tracker.on_rows_cleared(4).points, 100);
        assert_eq!(tracker.score(), 200);
        assert_eq!(tracker.lines(), 5);
        assert_eq!(tracker.clear_events(), 2);
    }

    #[test]
    fn test_per_line_policy_scales() {
        let mut tracker = ScoreTracker::new(100, 500, ScoringPolicy::PerLine);
        assert_eq!(tracker.on_rows_cleared(3).points, 300);
        assert_eq!(tracker.score(), 300);
    }

    #[test]
    fn test_zero_rows_is_not_an_event() {
        let mut tracker = ScoreTracker::default();
        assert_eq!(tracker.on_rows_cleared(0), ScoreResult::default());
        assert_eq!(tracker.score(), 0);
        assert_eq!(tracker.clear_events(), 0);
    }

    #[test]
    fn test_level_steps_every_threshold() {
        let mut tracker = ScoreTracker::default();
        assert_eq!(tracker.level(), 1);
        for _ in 0..4 {
            assert!(!tracker.on_rows_cleared(1).leveled_up);
        }
        assert_eq!(tracker.score(), 400);
        assert_eq!(tracker.level(), 1);

        let result = tracker.on_rows_cleared(2);
        assert!(result.leveled_up);
        assert_eq!(tracker.level(), 2);
    }

    #[test]
    fn test_speed_multiplier_by_level() {
        assert_eq!(speed_multiplier(1), 1.0);
        assert!((speed_multiplier(2) - 1.1).abs() < 1e-9);
        assert!((speed_multiplier(11) - 2.0).abs() < 1e-9);
        // Level 0 never happens, but must not underflow.
        assert_eq!(speed_multiplier(0), 1.0);
    }

    #[test]
    fn test_gravity_interval_shrinks_with_level() {
        assert_eq!(gravity_interval_ms(1), 1000);
        assert_eq!(gravity_interval_ms(2), 909);
        assert_eq!(gravity_interval_ms(11), 500);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(ScoringPolicy::from_str("Flat"), Some(ScoringPolicy::Flat));
        assert_eq!(ScoringPolicy::from_str("per-line"), Some(ScoringPolicy::PerLine));
        assert_eq!(ScoringPolicy::from_str("combo"), None);
    }
}
