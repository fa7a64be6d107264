//! Game configuration (look sensitivity, dev mode). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Mouse sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Enable developer movement modes (fly, fixed-height, noclip, spawn freeze).
    #[serde(default)]
    pub dev_mode: bool,
    /// Log frame statistics once per second.
    #[serde(default)]
    pub show_fps: bool,
}

fn default_sensitivity() -> f32 {
    1.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
            dev_mode: false,
            show_fps: false,
        }
    }
}

/// Failure to load a config file. Callers that can fall back to defaults
/// should; the error is kept for the log line.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

impl GameConfig {
    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&data)?)
    }

    /// Load config from `config.ron`. If the file is missing or invalid,
    /// returns default config (missing file is not even worth a warning).
    pub fn load() -> Self {
        let path = config_path();
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unknown fields and missing fields both fall back cleanly.
    #[test]
    fn partial_config_fills_defaults() {
        let config: GameConfig = ron::from_str("(dev_mode: true)").unwrap();
        assert!(config.dev_mode);
        assert_eq!(config.sensitivity, 1.0);
        assert!(!config.show_fps);
    }

    /// A config round-trips through RON unchanged.
    #[test]
    fn config_round_trips() {
        let config = GameConfig {
            sensitivity: 0.7,
            dev_mode: true,
            show_fps: true,
        };
        let text = ron::ser::to_string_pretty(&config, Default::default()).unwrap();
        let back: GameConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.sensitivity, 0.7);
        assert!(back.dev_mode);
    }
}
