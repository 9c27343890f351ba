// error.rs: Error types for the goal store subsystem.

use thiserror::Error;

/// Errors that can occur while loading, saving, or configuring goals.
///
/// Empty goal text and unknown goal ids are deliberately absent: those are
/// silent no-ops on the store, not failures.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize goal data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The configuration file could not be parsed.
    #[error("config error in {path}: {source}")]
    ConfigError {
        path: String,
        source: toml::de::Error,
    },

    /// The configured countdown target is not a valid date.
    #[error(transparent)]
    CountdownError(#[from] dl_countdown::CountdownError),

    /// The configured date format cannot render a date.
    #[error("invalid date format '{0}'")]
    InvalidDateFormat(String),

    /// The persistence backend could not read the stored goals.
    #[error("persistence read failed: {0}")]
    PersistenceRead(String),

    /// The persistence backend could not write the goals.
    #[error("persistence write failed: {0}")]
    PersistenceWrite(String),
}
