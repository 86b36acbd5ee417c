//! Active timers resource definition.

use serde::Serialize;

use super::ResourceDefinition;
use crate::domains::resources::ResourceError;
use crate::domains::timers::{ActiveTimer, TimerService};

/// Running timers with their elapsed time so far (dynamic).
pub struct ActiveTimersResource;

#[derive(Serialize)]
struct ActiveTimers {
    count: usize,
    timers: Vec<ActiveTimer>,
}

impl ResourceDefinition for ActiveTimersResource {
    const URI: &'static str = "timers://active";
    const NAME: &'static str = "Active Timers";
    const DESCRIPTION: &'static str =
        "Tasks whose project timer is currently running, with start time and elapsed time";
    const MIME_TYPE: &'static str = "application/json";

    fn read(timers: &TimerService) -> Result<String, ResourceError> {
        let timers = timers.active();
        let body = ActiveTimers {
            count: timers.len(),
            timers,
        };
        Ok(serde_json::to_string_pretty(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notifications::Broadcaster;
    use crate::domains::timers::{ManualClock, TimerStore};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_active_timers_metadata() {
        assert_eq!(ActiveTimersResource::URI, "timers://active");
        assert_eq!(ActiveTimersResource::MIME_TYPE, "application/json");
    }

    #[test]
    fn test_active_timers_content() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::at(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
        ));
        let timers = TimerService::with_clock(
            TimerStore::new(temp_dir.path().join("timers.json")),
            Arc::new(Broadcaster::new()),
            clock.clone(),
        );

        let empty: serde_json::Value =
            serde_json::from_str(&ActiveTimersResource::read(&timers).unwrap()).unwrap();
        assert_eq!(empty["count"], 0);

        timers.start("Design review").unwrap();
        clock.advance_ms(125_000);

        let json: serde_json::Value =
            serde_json::from_str(&ActiveTimersResource::read(&timers).unwrap()).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["timers"][0]["taskName"], "Design review");
        assert_eq!(json["timers"][0]["startedAt"], "2026-10-16T09:00:00.000Z");
        assert_eq!(json["timers"][0]["elapsedMs"], 125_000);
        assert_eq!(json["timers"][0]["formatted"], "2 minutes, 5 seconds");
    }
}
