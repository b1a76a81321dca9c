mod config;
pub mod document;
mod json_store;
mod memory;

pub use config::{Config, LogConfig, NotificationsConfig, StorageConfig};
pub use document::{SettingsEntry, SessionEntry, StoreDocument, SCHEMA_VERSION};
pub use json_store::JsonStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::durations::DurationPolicy;
use crate::error::StorageError;
use crate::session::SessionLog;

/// Durable home for the duration policy and session history.
///
/// Saving is fire-and-forget: implementations log their own failures and
/// never surface them, so the timer keeps running when the disk does not.
/// Loading falls back to defaults (25/5/25, empty log) on any failure.
pub trait PersistenceSink {
    fn save(&mut self, policy: &DurationPolicy, log: &SessionLog);

    fn load(&self) -> (DurationPolicy, SessionLog);
}

/// Returns `~/.config/focustimer[-dev]/` based on FOCUSTIMER_ENV.
///
/// Set FOCUSTIMER_ENV=dev to use the development data directory, or
/// FOCUSTIMER_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("FOCUSTIMER_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSTIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focustimer-dev")
            } else {
                base_dir.join("focustimer")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
