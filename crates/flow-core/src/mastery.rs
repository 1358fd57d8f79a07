//! Progress toward the 10,000-hour mastery goal.

use crate::entry::TimeEntry;

/// The classic mastery target.
pub const MASTERY_TARGET_HOURS: u64 = 10_000;

const MASTERY_TARGET_SECONDS: u64 = MASTERY_TARGET_HOURS * 3600;

/// Sum of all recorded practice time.
pub fn total_seconds(entries: &[TimeEntry]) -> u64 {
    entries.iter().map(|e| e.duration_seconds).sum()
}

/// Percentage of the mastery target reached. Formatted to two decimal
/// places for display; not clamped to 100.
pub fn mastery_progress_pct(total_seconds: u64) -> f64 {
    total_seconds as f64 / MASTERY_TARGET_SECONDS as f64 * 100.0
}

/// Whole hours left to the mastery target.
pub fn remaining_hours(total_seconds: u64) -> u64 {
    MASTERY_TARGET_HOURS.saturating_sub(total_seconds / 3600)
}

/// Compact hour display: 1,000 hours and up render as "1.0k".
pub fn format_hours(hours: u64) -> String {
    if hours >= 1000 {
        format!("{:.1}k", hours as f64 / 1000.0)
    } else {
        hours.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_linear_in_practice_time() {
        assert_eq!(mastery_progress_pct(0), 0.0);
        // 100 hours of 10,000 is 1%.
        assert!((mastery_progress_pct(100 * 3600) - 1.0).abs() < 1e-9);
        assert!((mastery_progress_pct(MASTERY_TARGET_HOURS * 3600) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn remaining_hours_never_underflows() {
        assert_eq!(remaining_hours(0), 10_000);
        assert_eq!(remaining_hours(9_999 * 3600 + 1800), 1);
        assert_eq!(remaining_hours(20_000 * 3600), 0);
    }

    #[test]
    fn compact_hour_display() {
        assert_eq!(format_hours(0), "0");
        assert_eq!(format_hours(999), "999");
        assert_eq!(format_hours(1000), "1.0k");
        assert_eq!(format_hours(1234), "1.2k");
        assert_eq!(format_hours(10_000), "10.0k");
    }
}
