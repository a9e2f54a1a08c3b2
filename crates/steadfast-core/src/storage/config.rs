//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - How much daily content is shown
//! - Defaults for a newly created profile
//! - Log verbosity
//! - Whether sample disciplines are seeded on first run
//!
//! Configuration is stored at `~/.config/steadfast/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calendar::MAX_WINDOW_DAYS;
use crate::error::{ConfigError, Result};

/// Daily content configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Items in the "today" learning list.
    #[serde(default = "default_learning_items_per_day")]
    pub learning_items_per_day: usize,
    /// Entries shown by the recent-journal view.
    #[serde(default = "default_recent_journal_entries")]
    pub recent_journal_entries: usize,
    /// Days covered by the activity summary.
    #[serde(default = "default_activity_window_days")]
    pub activity_window_days: u32,
}

/// Defaults applied when a profile is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefaults {
    #[serde(default = "default_streak_goal")]
    pub streak_goal: u32,
    #[serde(default = "default_true")]
    pub notifications: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when STEADFAST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/steadfast/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub profile: ProfileDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Seed sample disciplines when none exist.
    #[serde(default = "default_true")]
    pub seed_on_first_run: bool,
}

fn default_learning_items_per_day() -> usize {
    3
}
fn default_recent_journal_entries() -> usize {
    10
}
fn default_activity_window_days() -> u32 {
    7
}
fn default_streak_goal() -> u32 {
    5
}
fn default_log_level() -> String {
    "warn".into()
}
fn default_true() -> bool {
    true
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            learning_items_per_day: default_learning_items_per_day(),
            recent_journal_entries: default_recent_journal_entries(),
            activity_window_days: default_activity_window_days(),
        }
    }
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            streak_goal: default_streak_goal(),
            notifications: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content: ContentConfig::default(),
            profile: ProfileDefaults::default(),
            logging: LoggingConfig::default(),
            seed_on_first_run: true,
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
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

    /// Update a value by key in memory. Returns error if key is unknown,
    /// the value does not fit the field's type, or it is out of range.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate(key)?;
        *self = updated;
        Ok(())
    }

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        let out_of_range = |min: u32, max: u32, got: u32| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{got} is not between {min} and {max}"),
        };
        let window = self.content.activity_window_days;
        if !(1..=MAX_WINDOW_DAYS).contains(&window) {
            return Err(out_of_range(1, MAX_WINDOW_DAYS, window));
        }
        let goal = self.profile.streak_goal;
        if !(1..=7).contains(&goal) {
            return Err(out_of_range(1, 7, goal));
        }
        Ok(())
    }

    /// Update a value by key and save to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }
}
