//! Notification channel error types.

use thiserror::Error;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors that can occur in the notification channel.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to bind the event endpoint.
    #[error("Failed to bind event endpoint to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize an event payload.
    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl NotificationError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }
}
