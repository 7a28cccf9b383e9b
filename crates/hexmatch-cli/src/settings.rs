//! Driver settings read from the environment.

use hexmatch_core::{BotDifficulty, ConfigError, GameConfig};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Everything the driver needs to run one session
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: GameConfig,
    /// Fixed seed, or `None` for entropy
    pub seed: Option<u64>,
    /// Multiplier on every pacing delay; 0 runs instantly
    pub time_scale: f64,
    pub bot: BotDifficulty,
}

impl Settings {
    /// Read `HEXMATCH_CONFIG`, `HEXMATCH_SEED`, `HEXMATCH_TIME_SCALE` and
    /// `HEXMATCH_BOT`
    pub async fn from_env() -> Result<Self, SettingsError> {
        let config = match std::env::var_os("HEXMATCH_CONFIG") {
            Some(path) => {
                let path = PathBuf::from(path);
                let json = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| SettingsError::Read { path, source })?;
                GameConfig::from_json(&json)?
            }
            None => GameConfig::default(),
        };

        let seed = optional_var("HEXMATCH_SEED")
            .map(|value| {
                value
                    .parse::<u64>()
                    .map_err(|_| SettingsError::Invalid { name: "HEXMATCH_SEED", value })
            })
            .transpose()?;

        let time_scale = match optional_var("HEXMATCH_TIME_SCALE") {
            Some(value) => parse_time_scale(&value).ok_or(SettingsError::Invalid {
                name: "HEXMATCH_TIME_SCALE",
                value,
            })?,
            None => 1.0,
        };

        let bot = match optional_var("HEXMATCH_BOT") {
            Some(value) => parse_bot(&value).ok_or(SettingsError::Invalid {
                name: "HEXMATCH_BOT",
                value,
            })?,
            None => BotDifficulty::Easy,
        };

        Ok(Self {
            config,
            seed,
            time_scale,
            bot,
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_time_scale(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s >= 0.0)
}

fn parse_bot(value: &str) -> Option<BotDifficulty> {
    match value.trim().to_ascii_lowercase().as_str() {
        "easy" => Some(BotDifficulty::Easy),
        "greedy" => Some(BotDifficulty::Greedy),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_scale() {
        assert_eq!(parse_time_scale("0"), Some(0.0));
        assert_eq!(parse_time_scale(" 2.5 "), Some(2.5));
        assert_eq!(parse_time_scale("-1"), None);
        assert_eq!(parse_time_scale("fast"), None);
    }

    #[test]
    fn test_parse_bot() {
        assert_eq!(parse_bot("Greedy"), Some(BotDifficulty::Greedy));
        assert_eq!(parse_bot("easy"), Some(BotDifficulty::Easy));
        assert_eq!(parse_bot("hard"), None);
    }
}
