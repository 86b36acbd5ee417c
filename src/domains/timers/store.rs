//! File-backed timer persistence.
//!
//! The whole collection lives in one JSON object mapping task name to start
//! time. It is read fresh on every operation and rewritten in full on every
//! mutation:
//!
//! ```json
//! {
//!   "Client call prep": "2026-02-16T22:58:20.000Z",
//!   "Sunny Side Cafe hero image": "2026-02-16T22:57:36.789Z"
//! }
//! ```
//!
//! Files written with epoch-millisecond values are still readable and are
//! converted to RFC 3339 strings on the next save.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::error::{TimerError, TimerResult};

/// All active timers, keyed by task name.
pub type TimerCollection = BTreeMap<String, DateTime<Utc>>;

/// Format a timestamp the way it is persisted and reported.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A start time as it may appear on disk.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredStart {
    EpochMillis(i64),
    Timestamp(DateTime<Utc>),
}

/// JSON file holding the active timer collection.
///
/// There is no locking across processes; concurrent writers race and the
/// last write wins.
#[derive(Debug, Clone)]
pub struct TimerStore {
    path: PathBuf,
}

impl TimerStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted collection.
    ///
    /// A missing, unreadable or malformed file yields an empty collection.
    /// Entries whose start time cannot be decoded are dropped individually.
    pub fn load(&self) -> TimerCollection {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Timer file {} does not exist yet", self.path.display());
                return TimerCollection::new();
            }
            Err(e) => {
                warn!("Failed to read timer file {}: {}", self.path.display(), e);
                return TimerCollection::new();
            }
        };

        let stored: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(
                    "Timer file {} is malformed, treating as empty: {}",
                    self.path.display(),
                    e
                );
                return TimerCollection::new();
            }
        };

        stored
            .into_iter()
            .filter_map(|(task, value)| parse_start(&task, value).map(|ts| (task, ts)))
            .collect()
    }

    /// Overwrite the backing file with the given collection.
    pub fn save(&self, timers: &TimerCollection) -> TimerResult<()> {
        let stored: BTreeMap<&str, String> = timers
            .iter()
            .map(|(task, start)| (task.as_str(), format_timestamp(start)))
            .collect();
        let json = serde_json::to_string_pretty(&stored)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| TimerError::persist(&self.path, e))?;
        }

        fs::write(&self.path, json).map_err(|e| TimerError::persist(&self.path, e))?;
        debug!("Saved {} timer(s) to {}", timers.len(), self.path.display());
        Ok(())
    }
}

/// Decode one persisted start time, or `None` if the entry is unusable.
fn parse_start(task: &str, value: serde_json::Value) -> Option<DateTime<Utc>> {
    match serde_json::from_value(value) {
        Ok(StoredStart::Timestamp(ts)) => Some(ts),
        Ok(StoredStart::EpochMillis(ms)) => {
            let ts = DateTime::from_timestamp_millis(ms);
            if ts.is_none() {
                warn!("Ignoring timer '{}' with out-of-range start {}", task, ms);
            }
            ts
        }
        Err(e) => {
            warn!("Ignoring timer '{}' with invalid start: {}", task, e);
            None
        }
    }
}
