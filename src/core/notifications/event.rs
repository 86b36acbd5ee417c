//! Notification event payloads.

use serde::{Deserialize, Serialize};

use super::NotificationResult;

/// A timer lifecycle event sent to listeners.
///
/// Serialized as `{"type":"start","taskName":"..."}` or
/// `{"type":"stop","taskName":"...","formatted":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimerEvent {
    /// A timer was started.
    Start {
        #[serde(rename = "taskName")]
        task_name: String,
    },

    /// A timer was stopped; `formatted` is the human-readable elapsed time.
    Stop {
        #[serde(rename = "taskName")]
        task_name: String,
        formatted: String,
    },
}

impl TimerEvent {
    pub fn start(task_name: impl Into<String>) -> Self {
        Self::Start {
            task_name: task_name.into(),
        }
    }

    pub fn stop(task_name: impl Into<String>, formatted: impl Into<String>) -> Self {
        Self::Stop {
            task_name: task_name.into(),
            formatted: formatted.into(),
        }
    }

    /// Name of the task this event refers to.
    pub fn task_name(&self) -> &str {
        match self {
            Self::Start { task_name } | Self::Stop { task_name, .. } => task_name,
        }
    }

    /// Serialize the event as a single-line JSON payload.
    pub fn to_payload(&self) -> NotificationResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_payload() {
        let payload = TimerEvent::start("Design review").to_payload().unwrap();
        assert_eq!(payload, r#"{"type":"start","taskName":"Design review"}"#);
    }

    #[test]
    fn test_stop_payload() {
        let payload = TimerEvent::stop("Design review", "1 minute, 1 second")
            .to_payload()
            .unwrap();
        assert_eq!(
            payload,
            r#"{"type":"stop","taskName":"Design review","formatted":"1 minute, 1 second"}"#
        );
    }

    #[test]
    fn test_listener_payload_parses() {
        let event: TimerEvent =
            serde_json::from_str(r#"{"type":"stop","taskName":"Copy edits","formatted":"2 hours"}"#)
                .unwrap();
        assert_eq!(event, TimerEvent::stop("Copy edits", "2 hours"));
        assert_eq!(event.task_name(), "Copy edits");
    }
}
