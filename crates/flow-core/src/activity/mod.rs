//! Activity aggregation: day buckets, the year heatmap grid, and streaks.
//!
//! Everything here is a pure function over a snapshot of time entries. No
//! mutation, no hidden clock - callers pass "today" in explicitly where a
//! computation needs it - so repeated or concurrent calls are safe.

mod bucket;
mod grid;
mod streak;

pub use bucket::{activity_by_date, bucket_by_day, classify_intensity, DayBucket, Intensity};
pub use grid::{build_week_grid, GridCell, WeekGrid};
pub use streak::{active_day_count, consistency_pct, current_streak};
