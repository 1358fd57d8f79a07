//! TOML-based application configuration.
//!
//! Stores user preferences including the timer session slot key and
//! heatmap display settings.
//!
//! Configuration is stored at `~/.config/flow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError};
use crate::timer::SESSION_KEY;

/// Timer-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Slot key used for the single persisted timer session.
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

/// Heatmap display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Glyphs for the none/low/medium/high intensity bands, in order.
    #[serde(default = "default_heatmap_glyphs")]
    pub glyphs: String,
    /// Glyph for cells outside the displayed year.
    #[serde(default = "default_blank_glyph")]
    pub blank: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/flow/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub heatmap: HeatmapConfig,
}

fn default_session_key() -> String {
    SESSION_KEY.to_string()
}
fn default_heatmap_glyphs() -> String {
    ".░▒▓".into()
}
fn default_blank_glyph() -> String {
    " ".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            session_key: default_session_key(),
        }
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            glyphs: default_heatmap_glyphs(),
            blank: default_blank_glyph(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            heatmap: HeatmapConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| {
                    ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    }
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }
}
