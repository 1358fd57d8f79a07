//! Full-year week grid for the practice heatmap.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::bucket::DayBucket;

/// One cell of the year grid.
///
/// `Blank` cells fill the leading days before Jan 1, the trailing days
/// after Dec 31, and render as empty space. They carry no intensity and
/// never count toward streaks or stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum GridCell {
    Blank,
    Day(DayBucket),
}

impl GridCell {
    pub fn as_day(&self) -> Option<&DayBucket> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(bucket) => Some(bucket),
        }
    }
}

/// Sunday-first week grid covering one calendar year.
///
/// Weeks run from the Sunday on/before Jan 1 through Dec 31; every week
/// holds exactly 7 cells, the final one right-padded with blanks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    pub year: i32,
    pub weeks: Vec<Vec<GridCell>>,
}

/// Build the week grid for `year` from day-bucket totals.
///
/// Days of the year absent from `buckets` synthesize an empty bucket
/// (0 seconds, no intensity). Runs in O(days in range).
pub fn build_week_grid(year: i32, buckets: &BTreeMap<NaiveDate, u64>) -> WeekGrid {
    let (Some(jan1), Some(dec31)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return WeekGrid { year, weeks: vec![] };
    };

    let lead_days = jan1.weekday().num_days_from_sunday() as i64;
    let mut cursor = jan1 - Duration::days(lead_days);

    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    while cursor <= dec31 {
        if cursor.year() == year {
            let total = buckets.get(&cursor).copied().unwrap_or(0);
            week.push(GridCell::Day(DayBucket::new(cursor, total)));
        } else {
            week.push(GridCell::Blank);
        }
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
            week.reserve(7);
        }
        cursor += Duration::days(1);
    }
    if !week.is_empty() {
        week.resize(7, GridCell::Blank);
        weeks.push(week);
    }

    WeekGrid { year, weeks }
}
