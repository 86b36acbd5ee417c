//! Time source for timer operations.

use chrono::{DateTime, SubsecRound, Utc};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
///
/// Readings are truncated to milliseconds, the precision timers are stored at.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// Manually driven clock for deterministic tests.
#[cfg(test)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    /// Create a clock frozen at the given time.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    /// Move the clock forward by the given number of milliseconds.
    pub fn advance_ms(&self, ms: i64) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::milliseconds(ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
