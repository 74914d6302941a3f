//! TOML-based engine configuration.
//!
//! Stores the tunable analytics parameters:
//! - Streak qualification threshold (success rate percentage)
//! - Trend deadzone and default trend window
//! - Week-view window size
//!
//! Configuration is stored at `~/.config/hunterlog/config.toml`.

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/hunterlog/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// A day counts toward a streak iff its success rate meets this
    /// percentage.
    #[serde(default = "default_streak_threshold")]
    pub streak_threshold: u8,
    /// Half-window mean difference below which a trend reads as stable.
    #[serde(default = "default_trend_deadzone")]
    pub trend_deadzone: f64,
    /// Default window (days) for trend classification.
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,
    /// Window (days) for the week report.
    #[serde(default = "default_week_window")]
    pub week_window: usize,
}

// Default functions
fn default_streak_threshold() -> u8 {
    80
}
fn default_trend_deadzone() -> f64 {
    5.0
}
fn default_trend_window() -> usize {
    7
}
fn default_week_window() -> usize {
    7
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            streak_threshold: default_streak_threshold(),
            trend_deadzone: default_trend_deadzone(),
            trend_window: default_trend_window(),
            week_window: default_week_window(),
        }
    }
}

impl EngineConfig {
    /// Load the configuration, falling back to defaults if the file is
    /// absent or malformed.
    pub fn load() -> Self {
        let Ok(dir) = data_dir() else {
            return Self::default();
        };
        let path = dir.join("config.toml");
        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save the configuration.
    ///
    /// # Errors
    /// Returns an error if the config directory or file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::SaveFailed {
            path: "~/.config/hunterlog".into(),
            message: e.to_string(),
        })?;
        let path = dir.join("config.toml");
        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Read a single key as a display string.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "streak_threshold" => Ok(self.streak_threshold.to_string()),
            "trend_deadzone" => Ok(self.trend_deadzone.to_string()),
            "trend_window" => Ok(self.trend_window.to_string()),
            "week_window" => Ok(self.week_window.to_string()),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }

    /// Set a single key from a string value.
    ///
    /// # Errors
    /// `UnknownKey` for unrecognized keys, `InvalidValue` if the value does
    /// not parse or is out of range.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "streak_threshold" => {
                let parsed: u8 = value.parse().map_err(|_| invalid("expected 0-100".into()))?;
                if parsed > 100 {
                    return Err(invalid("expected 0-100".into()));
                }
                self.streak_threshold = parsed;
            }
            "trend_deadzone" => {
                let parsed: f64 = value
                    .parse()
                    .map_err(|_| invalid("expected a number".into()))?;
                if !(0.0..=100.0).contains(&parsed) {
                    return Err(invalid("expected 0-100".into()));
                }
                self.trend_deadzone = parsed;
            }
            "trend_window" => {
                self.trend_window = value
                    .parse()
                    .map_err(|_| invalid("expected a positive integer".into()))?;
            }
            "week_window" => {
                self.week_window = value
                    .parse()
                    .map_err(|_| invalid("expected a positive integer".into()))?;
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// All keys and their current values, for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("streak_threshold", self.streak_threshold.to_string()),
            ("trend_deadzone", self.trend_deadzone.to_string()),
            ("trend_window", self.trend_window.to_string()),
            ("week_window", self.week_window.to_string()),
        ]
    }
}
