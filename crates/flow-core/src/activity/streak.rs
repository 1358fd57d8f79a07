//! Consecutive-day streaks and consistency stats.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

/// Count consecutive active days walking back from `today`.
///
/// A day counts when its bucket total is > 0. `today` with no activity yet
/// does not break an existing streak (the day is still in progress); the
/// walk simply continues from yesterday. The first genuine gap stops the
/// count, and the walk never looks past it.
pub fn current_streak(buckets: &BTreeMap<NaiveDate, u64>, today: NaiveDate) -> u32 {
    let active = |day: NaiveDate| buckets.get(&day).copied().unwrap_or(0) > 0;

    let mut day = if active(today) {
        today
    } else {
        match today.pred_opt() {
            Some(prev) => prev,
            None => return 0,
        }
    };

    let mut streak = 0;
    while active(day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Distinct dates within `year` with any recorded activity.
pub fn active_day_count(buckets: &BTreeMap<NaiveDate, u64>, year: i32) -> u32 {
    buckets
        .iter()
        .filter(|(date, &total)| date.year() == year && total > 0)
        .count() as u32
}

/// Share of `year`'s days with activity, as a percentage.
///
/// Leap-aware (divides by 365 or 366). Callers format to two decimal
/// places for display; the value itself is not clamped.
pub fn consistency_pct(buckets: &BTreeMap<NaiveDate, u64>, year: i32) -> f64 {
    let days_in_year = NaiveDate::from_ymd_opt(year, 12, 31)
        .map(|d| d.ordinal())
        .unwrap_or(365);
    active_day_count(buckets, year) as f64 / days_in_year as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn buckets(days: &[(NaiveDate, u64)]) -> BTreeMap<NaiveDate, u64> {
        days.iter().copied().collect()
    }

    #[test]
    fn counts_consecutive_days_ending_today() {
        let today = date(2025, 5, 10);
        let b = buckets(&[
            (date(2025, 5, 10), 600),
            (date(2025, 5, 9), 600),
            (date(2025, 5, 8), 600),
        ]);
        assert_eq!(current_streak(&b, today), 3);
    }

    #[test]
    fn today_without_activity_does_not_break_streak() {
        let today = date(2025, 5, 10);
        let b = buckets(&[(date(2025, 5, 9), 600), (date(2025, 5, 8), 600)]);
        assert_eq!(current_streak(&b, today), 2);
    }

    #[test]
    fn gap_before_yesterday_stops_the_walk() {
        let today = date(2025, 5, 10);
        let b = buckets(&[(date(2025, 5, 10), 600), (date(2025, 5, 8), 600)]);
        assert_eq!(current_streak(&b, today), 1);
    }

    #[test]
    fn no_activity_at_all_is_zero() {
        assert_eq!(current_streak(&BTreeMap::new(), date(2025, 5, 10)), 0);
    }

    #[test]
    fn zero_second_days_do_not_count() {
        let today = date(2025, 5, 10);
        let b = buckets(&[(date(2025, 5, 10), 0), (date(2025, 5, 9), 600)]);
        assert_eq!(current_streak(&b, today), 1);
    }

    #[test]
    fn active_days_are_scoped_to_the_year() {
        let b = buckets(&[
            (date(2025, 1, 1), 600),
            (date(2025, 6, 1), 0),
            (date(2025, 12, 31), 600),
            (date(2024, 12, 31), 600),
        ]);
        assert_eq!(active_day_count(&b, 2025), 2);
        assert_eq!(active_day_count(&b, 2024), 1);
    }

    #[test]
    fn consistency_respects_leap_years() {
        let b = buckets(&[(date(2024, 2, 29), 600)]);
        let pct = consistency_pct(&b, 2024);
        assert!((pct - 100.0 / 366.0).abs() < 1e-9);

        let b25 = buckets(&[(date(2025, 7, 4), 600)]);
        let pct25 = consistency_pct(&b25, 2025);
        assert!((pct25 - 100.0 / 365.0).abs() < 1e-9);
    }
}
