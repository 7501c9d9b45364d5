//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Breathing phase durations
//! - Meditation length
//! - Mood journal display settings
//!
//! Configuration is stored at `~/.config/stillmind/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::timer::Routine;

/// Breathing routine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_inhale_secs")]
    pub inhale_secs: u64,
    #[serde(default = "default_hold_secs")]
    pub hold_secs: u64,
    #[serde(default = "default_exhale_secs")]
    pub exhale_secs: u64,
}

/// Meditation timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeditationConfig {
    #[serde(default = "default_meditation_min")]
    pub duration_min: u64,
}

/// Mood journal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodConfig {
    /// How many entries `mood list` shows by default.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/stillmind/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub breathing: BreathingConfig,
    #[serde(default)]
    pub meditation: MeditationConfig,
    #[serde(default)]
    pub mood: MoodConfig,
}

// Default functions
fn default_inhale_secs() -> u64 {
    4
}
fn default_hold_secs() -> u64 {
    4
}
fn default_exhale_secs() -> u64 {
    6
}
fn default_meditation_min() -> u64 {
    5
}
fn default_recent_limit() -> usize {
    7
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            inhale_secs: default_inhale_secs(),
            hold_secs: default_hold_secs(),
            exhale_secs: default_exhale_secs(),
        }
    }
}

impl Default for MeditationConfig {
    fn default() -> Self {
        Self {
            duration_min: default_meditation_min(),
        }
    }
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            breathing: BreathingConfig::default(),
            meditation: MeditationConfig::default(),
            mood: MoodConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    ConfigError::ParseFailed(format!(
                                        "cannot parse '{value}' as number"
                                    ))
                                })?
                        } else {
                            return Err(ConfigError::ParseFailed(format!(
                                "cannot parse '{value}' as number"
                            )));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| {
                    CoreError::Config(ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    })
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
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| {
            CoreError::Config(ConfigError::SaveFailed {
                path: path.clone(),
                message: e.to_string(),
            })
        })?;
        std::fs::write(&path, content).map_err(|e| {
            CoreError::Config(ConfigError::SaveFailed {
                path,
                message: e.to_string(),
            })
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns an error if the key
    /// is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// The configured breathing routine, revalidated.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfiguration` if any configured
    /// duration is zero.
    pub fn breathing_routine(&self) -> Result<Routine> {
        Routine::breathing_with(
            self.breathing.inhale_secs,
            self.breathing.hold_secs,
            self.breathing.exhale_secs,
        )
    }

    /// The configured meditation routine, revalidated.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfiguration` if the configured
    /// duration is zero.
    pub fn meditation_routine(&self) -> Result<Routine> {
        Routine::meditation(self.meditation.duration_min.saturating_mul(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::RoutineMode;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.breathing.inhale_secs, 4);
        assert_eq!(parsed.meditation.duration_min, 5);
        assert_eq!(parsed.mood.recent_limit, 7);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("breathing.inhale_secs").as_deref(), Some("4"));
        assert_eq!(cfg.get("meditation.duration_min").as_deref(), Some("5"));
        assert!(cfg.get("breathing.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "breathing.exhale_secs", "8").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "breathing.exhale_secs").unwrap(),
            &serde_json::Value::Number(8.into())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "breathing.nonexistent", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result =
            Config::set_json_value_by_path(&mut json, "breathing.inhale_secs", "not_a_number");
        assert!(matches!(result, Err(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn routines_come_from_config_values() {
        let mut cfg = Config::default();
        cfg.breathing.exhale_secs = 8;
        let routine = cfg.breathing_routine().unwrap();
        assert_eq!(routine.mode(), RoutineMode::Cyclic);
        assert_eq!(routine.phase(2).unwrap().duration_secs, 8);

        let meditation = cfg.meditation_routine().unwrap();
        assert_eq!(meditation.mode(), RoutineMode::Terminal);
        assert_eq!(meditation.total_secs(), 300);
    }

    #[test]
    fn zero_configured_duration_is_rejected() {
        let mut cfg = Config::default();
        cfg.breathing.hold_secs = 0;
        assert!(cfg.breathing_routine().is_err());

        cfg.meditation.duration_min = 0;
        assert!(cfg.meditation_routine().is_err());
    }
}
