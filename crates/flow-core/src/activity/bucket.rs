//! Day bucketing and intensity classification.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::TimeEntry;

/// Practice intensity band for one calendar day.
///
/// This 3-level classification is the contract used everywhere: calendar
/// cells, streak displays, stats. Boundaries are inclusive on the lower
/// bound of each band, so exactly one hour is `Medium` and exactly two
/// hours is `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
}

/// Classify a day's total practice time.
pub fn classify_intensity(total_seconds: u64) -> Intensity {
    if total_seconds == 0 {
        Intensity::None
    } else if total_seconds < 3600 {
        Intensity::Low
    } else if total_seconds < 7200 {
        Intensity::Medium
    } else {
        Intensity::High
    }
}

/// One calendar day's aggregated activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub total_seconds: u64,
    pub intensity: Intensity,
}

impl DayBucket {
    pub fn new(date: NaiveDate, total_seconds: u64) -> Self {
        Self {
            date,
            total_seconds,
            intensity: classify_intensity(total_seconds),
        }
    }

    /// A day with no recorded entries.
    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, 0)
    }
}

/// Group entries by the entry-local calendar date of their start time and
/// sum durations per day. Pure function of its input.
pub fn bucket_by_day(entries: &[TimeEntry]) -> BTreeMap<NaiveDate, u64> {
    let mut buckets = BTreeMap::new();
    for entry in entries {
        *buckets.entry(entry.start_time.date_naive()).or_insert(0) += entry.duration_seconds;
    }
    buckets
}

/// Per-day activity summaries, newest day first.
pub fn activity_by_date(entries: &[TimeEntry]) -> Vec<DayBucket> {
    bucket_by_day(entries)
        .into_iter()
        .rev()
        .map(|(date, total_seconds)| DayBucket::new(date, total_seconds))
        .collect()
}
