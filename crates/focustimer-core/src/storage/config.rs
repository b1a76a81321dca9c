//! TOML-based application configuration.
//!
//! Stores preferences that are not part of the timer model:
//! - Notification behaviour
//! - Store file location
//! - Log filter
//!
//! Durations and history live in the JSON store, not here. Configuration is
//! stored at `~/.config/focustimer/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::data_dir;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell on completion.
    #[serde(default = "default_true")]
    pub bell: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the JSON store location.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "warn".into()
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|err| ConfigError::LoadFailed {
                path: PathBuf::from("config.toml"),
                message: err.to_string(),
            })
    }

    /// Load from disk, or defaults when no file exists yet.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    /// Load from disk, returning defaults on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "config unreadable, using defaults");
            Self::default()
        })
    }

    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Value at a dot-separated key such as `notifications.bell`.
    /// Unset optional values read as an empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let root = serde_json::to_value(self).ok()?;
        match lookup(&root, key)? {
            Value::Null => Some(String::new()),
            Value::String(s) => Some(s.clone()),
            Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set the value at a dot-separated key, keeping the existing type.
    /// Does not write to disk.
    ///
    /// # Errors
    /// Returns an error for unknown keys or values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut root =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;

        let (parent_key, leaf) = key
            .rsplit_once('.')
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let section = lookup_mut(&mut root, parent_key)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = section
            .get(leaf)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let parsed = match existing {
            Value::Bool(_) => Value::Bool(
                value
                    .parse()
                    .map_err(|_| invalid(format!("'{value}' is not a bool")))?,
            ),
            Value::Number(_) => Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("'{value}' is not a number")))?
                    .into(),
            ),
            Value::Null if value.is_empty() => Value::Null,
            Value::Object(_) | Value::Array(_) => {
                return Err(ConfigError::UnknownKey(key.to_string()))
            }
            _ => Value::String(value.to_string()),
        };
        section.insert(leaf.to_string(), parsed);

        *self = serde_json::from_value(root).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }
}

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(root, |node, part| node.get(part))
}

fn lookup_mut<'a>(root: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    key.split('.').try_fold(root, |node, part| node.get_mut(part))
}
