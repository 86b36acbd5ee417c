//! Timer start/stop orchestration.
//!
//! Each operation loads the collection from disk, applies the change,
//! persists it, and only then notifies listeners. Nothing is cached between
//! calls.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument};

use super::clock::{Clock, SystemClock};
use super::duration::format_duration;
use super::error::TimerResult;
use super::store::{TimerStore, format_timestamp};
use crate::core::notifications::{Broadcaster, TimerEvent};

/// Result of starting a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    pub task_name: String,
    pub started_at: DateTime<Utc>,
    /// Start time of a running timer for the same task that was discarded.
    pub replaced: Option<DateTime<Utc>>,
}

/// A timer that has just been stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoppedTimer {
    pub task_name: String,
    pub started_at: DateTime<Utc>,
    pub stopped_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub formatted: String,
}

/// Result of stopping a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// No timer was running under this name. Nothing was changed.
    NotFound { task_name: String },
    /// The timer was removed.
    Stopped(StoppedTimer),
}

/// Snapshot of a running timer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTimer {
    pub task_name: String,
    pub started_at: String,
    pub elapsed_ms: u64,
    pub formatted: String,
}

/// Runs the `inactive -> active -> inactive` lifecycle of named timers.
pub struct TimerService {
    store: TimerStore,
    broadcaster: Arc<Broadcaster>,
    clock: Arc<dyn Clock>,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl TimerService {
    /// Create a service using the system clock.
    pub fn new(store: TimerStore, broadcaster: Arc<Broadcaster>) -> Self {
        Self::with_clock(store, broadcaster, Arc::new(SystemClock))
    }

    /// Create a service with a custom time source.
    pub fn with_clock(
        store: TimerStore,
        broadcaster: Arc<Broadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            broadcaster,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// The backing store.
    pub fn store(&self) -> &TimerStore {
        &self.store
    }

    /// Start (or restart) the timer for a task.
    ///
    /// A timer already running under the same name is overwritten; only the
    /// latest start time is kept.
    #[instrument(skip(self))]
    pub fn start(&self, task_name: &str) -> TimerResult<StartOutcome> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let started_at = self.clock.now();
        let mut timers = self.store.load();
        let replaced = timers.insert(task_name.to_string(), started_at);
        self.store.save(&timers)?;

        match replaced {
            Some(previous) => info!(
                "Restarted timer for '{}' (discarded start {})",
                task_name,
                format_timestamp(&previous)
            ),
            None => info!("Started timer for '{}'", task_name),
        }

        let delivered = self.broadcaster.broadcast(&TimerEvent::start(task_name));
        debug!("Start notification delivered to {} listener(s)", delivered);

        Ok(StartOutcome {
            task_name: task_name.to_string(),
            started_at,
            replaced,
        })
    }

    /// Stop the timer for a task and report how long it ran.
    ///
    /// An unknown task is not an error: the collection is left untouched and
    /// `StopOutcome::NotFound` is returned.
    #[instrument(skip(self))]
    pub fn stop(&self, task_name: &str) -> TimerResult<StopOutcome> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut timers = self.store.load();
        let Some(started_at) = timers.remove(task_name) else {
            info!("No active timer for '{}'", task_name);
            return Ok(StopOutcome::NotFound {
                task_name: task_name.to_string(),
            });
        };

        let stopped_at = self.clock.now();
        let elapsed_ms = elapsed_ms(started_at, stopped_at);
        let formatted = format_duration(elapsed_ms);
        self.store.save(&timers)?;

        info!("Stopped timer for '{}' after {}", task_name, formatted);

        let delivered = self
            .broadcaster
            .broadcast(&TimerEvent::stop(task_name, formatted.clone()));
        debug!("Stop notification delivered to {} listener(s)", delivered);

        Ok(StopOutcome::Stopped(StoppedTimer {
            task_name: task_name.to_string(),
            started_at,
            stopped_at,
            elapsed_ms,
            formatted,
        }))
    }

    /// List running timers with their elapsed time so far.
    pub fn active(&self) -> Vec<ActiveTimer> {
        let now = self.clock.now();
        self.store
            .load()
            .into_iter()
            .map(|(task_name, started_at)| {
                let elapsed_ms = elapsed_ms(started_at, now);
                ActiveTimer {
                    task_name,
                    started_at: format_timestamp(&started_at),
                    elapsed_ms,
                    formatted: format_duration(elapsed_ms),
                }
            })
            .collect()
    }
}

/// Milliseconds between two instants, clamped at zero if the clock went back.
fn elapsed_ms(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_milliseconds()).unwrap_or(0)
}
