//! Timer-specific error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for timer operations.
pub type TimerResult<T> = Result<T, TimerError>;

/// Errors that can occur while persisting timers.
///
/// Reading the timer file never fails: a missing or unreadable file is
/// treated as an empty collection. Only writes surface errors.
#[derive(Debug, Error)]
pub enum TimerError {
    /// The timer file could not be written.
    #[error("Failed to write timer file {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The timer collection could not be serialized.
    #[error("Failed to serialize timers: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TimerError {
    /// Create a persist error for the given file.
    pub fn persist(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }
}
