//! TOML-based application configuration.
//!
//! Stores engine tuning and remote backend settings.
//! Configuration is stored at `~/.config/devwell/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::store::data_dir;

/// Activity engine tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seconds between ticks; the caller owns the timer.
    #[serde(default = "default_tick_period_secs")]
    pub tick_period_secs: u64,
    /// Acceleration magnitude (g) above which a sample counts as motion.
    #[serde(default = "default_motion_threshold_g")]
    pub motion_threshold_g: f64,
    /// Minutes without qualifying motion after which a tick is sedentary.
    #[serde(default = "default_idle_threshold_min")]
    pub idle_threshold_min: i64,
    /// Hours added to the sedentary/focus accumulators per tick.
    #[serde(default = "default_tick_increment_hours")]
    pub tick_increment_hours: f64,
}

/// Remote backend settings. Unset `base_url` means remote features are off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/devwell/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

// Default functions
fn default_tick_period_secs() -> u64 {
    60
}
fn default_motion_threshold_g() -> f64 {
    1.2
}
fn default_idle_threshold_min() -> i64 {
    2
}
fn default_tick_increment_hours() -> f64 {
    1.0 / 60.0
}
fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period_secs: default_tick_period_secs(),
            motion_threshold_g: default_motion_threshold_g(),
            idle_threshold_min: default_idle_threshold_min(),
            tick_increment_hours: default_tick_increment_hours(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
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
    pub fn save(&self) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.engine.tick_period_secs, 60);
        assert_eq!(parsed.engine.idle_threshold_min, 2);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[engine]\ntick_period_secs = 30\n").unwrap();
        assert_eq!(parsed.engine.tick_period_secs, 30);
        assert!((parsed.engine.motion_threshold_g - 1.2).abs() < f64::EPSILON);
        assert_eq!(parsed.remote.request_timeout_secs, 10);
        assert_eq!(parsed.remote.base_url, None);
    }
}
