//! Session constants.
//!
//! A `GameConfig` is fixed for the lifetime of a session. All fields have
//! defaults, so a partial JSON document is enough to override a few values.

use crate::hex::{Dimensions, Layout};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Number of distinct tile colors available
pub const MAX_COLORS: u8 = 6;

/// Problems with a configuration, found before a session is built
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("Board must be at least 3x3, got {width}x{height}")]
    BoardTooSmall { width: usize, height: usize },

    #[error("{bonus_tiles} bonus tiles do not fit on a board of {cells} cells")]
    TooManyBonusTiles { bonus_tiles: usize, cells: usize },

    #[error("Color count must be between 2 and {max}, got {got}")]
    ColorCount { got: u8, max: u8 },

    #[error("Layout offsets must be positive")]
    InvalidLayout,

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// Pacing intervals, in milliseconds.
///
/// These only affect presentation, except that the engine reports them so
/// a driver knows how long to wait between cascade steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Between applying a tentative swap and evaluating it
    pub swap_settle_ms: u64,
    /// Before a failed swap is reverted
    pub revert_delay_ms: u64,
    /// Removal effect; column collapse starts after it
    pub crush_effect_ms: u64,
    /// Per-tile fall animation
    pub tile_fall_ms: u64,
    /// After every tile has landed, before the board is rescanned
    pub post_fall_settle_ms: u64,
    /// Bonus-trigger effect, from trigger to completion callback
    pub bonus_effect_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            swap_settle_ms: 150,
            revert_delay_ms: 150,
            crush_effect_ms: 500,
            tile_fall_ms: 200,
            post_fall_settle_ms: 100,
            bonus_effect_ms: 1300,
        }
    }
}

impl Timing {
    pub fn swap_settle(&self) -> Duration {
        Duration::from_millis(self.swap_settle_ms)
    }

    pub fn revert_delay(&self) -> Duration {
        Duration::from_millis(self.revert_delay_ms)
    }

    pub fn crush_effect(&self) -> Duration {
        Duration::from_millis(self.crush_effect_ms)
    }

    pub fn tile_fall(&self) -> Duration {
        Duration::from_millis(self.tile_fall_ms)
    }

    pub fn post_fall_settle(&self) -> Duration {
        Duration::from_millis(self.post_fall_settle_ms)
    }

    pub fn bonus_effect(&self) -> Duration {
        Duration::from_millis(self.bonus_effect_ms)
    }
}

/// Everything a session needs to know up front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Bonus tiles placed at generation
    pub bonus_tiles: usize,
    /// Bonus triggers needed to complete the mission
    pub bonus_target: u32,
    /// How many of the colors are in play
    pub color_count: u8,
    /// Move budget
    pub max_moves: u32,
    /// Points per matched tile
    pub match_score: u64,
    /// Points per bonus trigger
    pub bonus_score: u64,
    /// Score shown as "full" by the progress display
    pub target_score: u64,
    pub layout: Layout,
    pub timing: Timing,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 7,
            bonus_tiles: 3,
            bonus_target: 10,
            color_count: MAX_COLORS,
            max_moves: 20,
            match_score: 20,
            bonus_score: 300,
            target_score: 5000,
            layout: Layout::default(),
            timing: Timing::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }

        let cells = self.width * self.height;
        if self.bonus_tiles >= cells {
            return Err(ConfigError::TooManyBonusTiles {
                bonus_tiles: self.bonus_tiles,
                cells,
            });
        }

        if !(2..=MAX_COLORS).contains(&self.color_count) {
            return Err(ConfigError::ColorCount {
                got: self.color_count,
                max: MAX_COLORS,
            });
        }

        let offsets_ok = |v: f64| v.is_finite() && v > 0.0;
        if !offsets_ok(self.layout.x_offset) || !offsets_ok(self.layout.y_offset) {
            return Err(ConfigError::InvalidLayout);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.match_score, 20);
        assert_eq!(config.bonus_score, 300);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "width": 9, "timing": { "tile_fall_ms": 50 } }"#)
            .unwrap();
        assert_eq!(config.width, 9);
        assert_eq!(config.height, 7);
        assert_eq!(config.timing.tile_fall(), Duration::from_millis(50));
        assert_eq!(config.timing.crush_effect_ms, 500);
    }

    #[test]
    fn test_rejects_bad_configs() {
        let small = GameConfig {
            width: 2,
            ..GameConfig::default()
        };
        assert!(matches!(small.validate(), Err(ConfigError::BoardTooSmall { .. })));

        let crowded = GameConfig {
            width: 3,
            height: 3,
            bonus_tiles: 9,
            ..GameConfig::default()
        };
        assert!(matches!(crowded.validate(), Err(ConfigError::TooManyBonusTiles { .. })));

        let mono = GameConfig {
            color_count: 1,
            ..GameConfig::default()
        };
        assert!(matches!(mono.validate(), Err(ConfigError::ColorCount { .. })));

        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
