//! Timers domain module.
//!
//! This module owns the project timer lifecycle: a task name is `inactive`
//! until `start` records a start time for it, and becomes `inactive` again
//! when `stop` removes that record and reports the elapsed time.
//!
//! ## Architecture
//!
//! - `store.rs` - JSON file persistence of the active timer collection
//! - `duration.rs` - Human-readable elapsed time formatting
//! - `clock.rs` - Time source abstraction
//! - `service.rs` - Start/stop orchestration and notification emission
//! - `error.rs` - Timer-specific error types

mod clock;
mod duration;
mod error;
mod service;
mod store;

pub use clock::{Clock, SystemClock};
pub use duration::format_duration;
pub use error::{TimerError, TimerResult};
pub use service::{ActiveTimer, StartOutcome, StopOutcome, StoppedTimer, TimerService};
pub use store::{TimerCollection, TimerStore, format_timestamp};

#[cfg(test)]
pub(crate) use clock::ManualClock;
