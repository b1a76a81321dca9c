//! Core error types for focustimer-core.
//!
//! Validation errors come from the leaf components (duration policy, session
//! records, session log, countdown engine) and always propagate to the caller.
//! Storage and notification errors are caught at their own boundary and only
//! show up here for callers that ask for them explicitly.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for focustimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Notification errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),
}

/// Validation errors raised synchronously by the leaf components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A duration setter received a value outside its bounds.
    #[error("Invalid duration for '{field}': {value} is outside [{min}, {max}]")]
    InvalidDuration {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// A session record was built from an inconsistent set of values.
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// A range query was given `to` before `from`.
    #[error("Invalid date range: {to} is before {from}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// The countdown engine was started with bad arguments.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the store failed
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the store failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the schema
    #[error("Malformed store document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document was written by a newer version
    #[error("Unsupported schema version {found} (supported up to {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    /// The document parsed but holds values the model rejects
    #[error("Store document holds invalid data: {0}")]
    InvalidData(#[from] ValidationError),

    /// Simulated failure (in-memory store)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors a notifier may report. The orchestrator logs and drops them.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notifier unavailable: {0}")]
    Unavailable(String),

    #[error("Notifier IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn unsupported() -> Result<(), StorageError> {
        Err(StorageError::UnsupportedSchema {
            found: 2,
            supported: 1,
        })
    }

    #[test]
    fn storage_errors_convert_with_question_mark() {
        fn load() -> Result<()> {
            unsupported()?;
            Ok(())
        }
        let err = load().unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::UnsupportedSchema { .. })));
        assert!(err.to_string().starts_with("Storage error: "));
    }
}
