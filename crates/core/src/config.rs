//! Session configuration.
//!
//! Defaults reproduce the reference game: a 10x20 field, 100 points per clear
//! event, a level every 500 points, uniform random spawns.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scoring::ScoringPolicy;
use crate::spawner::SpawnPolicy;
use crate::types::{
    FIELD_HEIGHT, FIELD_WIDTH, LEVEL_SCORE_THRESHOLD, MAX_FIELD_DIM, MIN_FIELD_DIM,
    SCORE_PER_CLEAR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub score_per_clear: u32,
    pub level_threshold: u32,
    pub scoring: ScoringPolicy,
    pub spawn: SpawnPolicy,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            score_per_clear: SCORE_PER_CLEAR,
            level_threshold: LEVEL_SCORE_THRESHOLD,
            scoring: ScoringPolicy::Flat,
            spawn: SpawnPolicy::Uniform,
            seed: 1,
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl GameConfig {
    /// Defaults overlaid with `BLOCKFALL_*` environment variables.
    ///
    /// Unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            width: env_parse("BLOCKFALL_WIDTH").unwrap_or(defaults.width),
            height: env_parse("BLOCKFALL_HEIGHT").unwrap_or(defaults.height),
            score_per_clear: env_parse("BLOCKFALL_SCORE_PER_CLEAR")
                .unwrap_or(defaults.score_per_clear),
            level_threshold: env_parse("BLOCKFALL_LEVEL_THRESHOLD")
                .unwrap_or(defaults.level_threshold),
            scoring: env::var("BLOCKFALL_SCORING")
                .ok()
                .and_then(|s| ScoringPolicy::from_str(&s))
                .unwrap_or(defaults.scoring),
            spawn: env::var("BLOCKFALL_SPAWN")
                .ok()
                .and_then(|s| SpawnPolicy::from_str(&s))
                .unwrap_or(defaults.spawn),
            seed: env_parse("BLOCKFALL_SEED").unwrap_or(defaults.seed),
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_spawn(mut self, spawn: SpawnPolicy) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = MIN_FIELD_DIM..=MAX_FIELD_DIM;
        if !dims.contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !dims.contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        if self.level_threshold == 0 {
            return Err(ConfigError::ZeroLevelThreshold);
        }
        if self.score_per_clear == 0 {
            return Err(ConfigError::ZeroScorePerClear);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_setup() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.score_per_clear, 100);
        assert_eq!(config.level_threshold, 500);
        assert_eq!(config.scoring, ScoringPolicy::Flat);
        assert_eq!(config.spawn, SpawnPolicy::Uniform);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        let config = GameConfig::default().with_size(2, 20);
        assert_eq!(config.validate(), Err(ConfigError::Width(2)));

        let config = GameConfig::default().with_size(10, 65);
        assert_eq!(config.validate(), Err(ConfigError::Height(65)));
    }

    #[test]
    fn test_validate_rejects_zero_thresholds() {
        let config = GameConfig {
            level_threshold: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLevelThreshold));

        let config = GameConfig {
            score_per_clear: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroScorePerClear));
    }

    #[test]
    fn test_error_messages_name_the_limits() {
        assert_eq!(
            ConfigError::Width(2).to_string(),
            "field width 2 is outside 4..=64"
        );
    }
}
