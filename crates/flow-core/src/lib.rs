//! # Flow Core Library
//!
//! Core logic for Flow, a personal practice tracker. The library owns the
//! two pieces with real temporal-correctness concerns - the persisted
//! practice timer and the activity calendar aggregation - and exposes them
//! behind small trait seams so the surrounding app (CLI here, any UI in
//! general) stays a thin layer.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a wall-clock-based state machine over a single
//!   persisted session slot; the caller drives it by invoking `tick()`
//!   periodically while it is running
//! - **Activity**: pure aggregation of time entries into day buckets, the
//!   year heatmap grid, and consecutive-day streaks
//! - **Storage**: SQLite-backed time-entry store and session slot, plus
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: timer state machine
//! - [`EntryStore`] / [`SessionStore`]: persistence collaborators
//! - [`build_week_grid`] / [`current_streak`]: calendar aggregation
//! - [`Database`]: SQLite implementation of both stores

pub mod activity;
pub mod clock;
pub mod entry;
pub mod error;
pub mod mastery;
pub mod storage;
pub mod timer;

pub use activity::{
    active_day_count, activity_by_date, bucket_by_day, build_week_grid, classify_intensity,
    consistency_pct, current_streak, DayBucket, GridCell, Intensity, WeekGrid,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CompletedInterval, EntryStore, TimeEntry};
pub use error::{ConfigError, CoreError, StorageError};
pub use storage::{Config, Database};
pub use timer::{
    format_hms, MemorySessionStore, SessionStore, TimerEngine, TimerSession, TimerState,
    SESSION_KEY,
};
