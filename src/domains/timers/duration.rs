//! Elapsed time formatting.

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Format a duration in milliseconds as a human-readable phrase.
///
/// Only non-zero components are listed, largest unit first, e.g.
/// `3_750_000` becomes `"1 hour, 2 minutes, 30 seconds"`. Sub-second
/// remainders are dropped. A zero duration yields `"0 seconds"`, so the
/// result is never empty.
pub fn format_duration(milliseconds: u64) -> String {
    let total_seconds = milliseconds / 1000;
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(pluralize(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(pluralize(minutes, "minute"));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(pluralize(seconds, "second"));
    }

    parts.join(", ")
}

fn pluralize(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_zero_seconds() {
        assert_eq!(format_duration(0), "0 seconds");
    }

    #[test]
    fn test_sub_second_rounds_down() {
        assert_eq!(format_duration(999), "0 seconds");
        assert_eq!(format_duration(1999), "1 second");
    }

    #[test]
    fn test_singular_units() {
        assert_eq!(format_duration(1_000), "1 second");
        assert_eq!(format_duration(61_000), "1 minute, 1 second");
        assert_eq!(format_duration(3_661_000), "1 hour, 1 minute, 1 second");
    }

    #[test]
    fn test_plural_units() {
        assert_eq!(format_duration(3_750_000), "1 hour, 2 minutes, 30 seconds");
        assert_eq!(format_duration(45_000), "45 seconds");
        assert_eq!(format_duration(26 * 3_600_000), "26 hours");
    }

    #[test]
    fn test_zero_components_are_skipped() {
        assert_eq!(format_duration(7_200_000), "2 hours");
        assert_eq!(format_duration(3_605_000), "1 hour, 5 seconds");
        assert_eq!(format_duration(120_000), "2 minutes");
    }

    #[test]
    fn test_units_never_empty_and_descending() {
        let rank = |part: &str| {
            if part.contains("hour") {
                0
            } else if part.contains("minute") {
                1
            } else {
                2
            }
        };

        for ms in (0..10_000_000u64).step_by(59_999) {
            let formatted = format_duration(ms);
            assert!(!formatted.is_empty(), "empty output for {} ms", ms);

            let ranks: Vec<_> = formatted.split(", ").map(rank).collect();
            assert!(
                ranks.windows(2).all(|w| w[0] < w[1]),
                "units out of order for {} ms: {}",
                ms,
                formatted
            );
        }
    }
}
