//! Error types for hometask.

use thiserror::Error;

/// Errors that can occur in hometask operations.
#[derive(Error, Debug)]
pub enum HomeTaskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("End date {end} is before start date {start}")]
    InvertedRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Notifier error: {0}")]
    Notifier(String),

    #[error("Notifier '{0}' not found in PATH")]
    NotifierNotInstalled(String),

    #[error("Notifier request timed out after {0}s")]
    NotifierTimeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for hometask operations.
pub type HomeTaskResult<T> = Result<T, HomeTaskError>;
