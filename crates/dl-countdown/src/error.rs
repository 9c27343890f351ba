// error.rs: Error types for countdown configuration.

use thiserror::Error;

/// Errors that can occur while configuring a countdown.
///
/// Computing a countdown never fails; only turning user-supplied text into a
/// target date can.
#[derive(Debug, Error)]
pub enum CountdownError {
    /// The target date was not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid target date '{input}': {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },
}
