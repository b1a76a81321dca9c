//! JSON file store.
//!
//! Stored at `~/.config/focustimer/focustimer.json` unless the config points
//! elsewhere. Writes go through a temp file in the same directory followed by
//! a rename, so a crash leaves either the old or the new document.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use super::{data_dir, document, Config, PersistenceSink};
use crate::durations::DurationPolicy;
use crate::error::StorageError;
use crate::session::SessionLog;

pub const DEFAULT_FILE_NAME: &str = "focustimer.json";

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store location from the config, falling back to the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, StorageError> {
        match &config.storage.data_file {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(data_dir()?.join(DEFAULT_FILE_NAME))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing file yields defaults; anything else
    /// that goes wrong is reported.
    pub fn try_load(&self) -> Result<(DurationPolicy, SessionLog), StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no store yet, using defaults");
                return Ok(Default::default());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        document::decode(&content)
    }

    pub fn try_save(&self, policy: &DurationPolicy, log: &SessionLog) -> Result<(), StorageError> {
        let json = document::encode(policy, log)?;
        atomic_write(&self.path, json.as_bytes()).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl PersistenceSink for JsonStore {
    fn save(&mut self, policy: &DurationPolicy, log: &SessionLog) {
        match self.try_save(policy, log) {
            Ok(()) => debug!(path = %self.path.display(), sessions = log.len(), "store saved"),
            Err(err) => warn!(path = %self.path.display(), error = %err, "failed to save store"),
        }
    }

    fn load(&self) -> (DurationPolicy, SessionLog) {
        self.try_load().unwrap_or_else(|err| {
            error!(path = %self.path.display(), error = %err, "store unreadable, using defaults");
            Default::default()
        })
    }
}

fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp_path = path.with_file_name(format!(
        ".{}.tmp.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id()
    ));

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)?;

    #[cfg(unix)]
    {
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
