//! Time-entry records and the store the surrounding app persists them in.
//!
//! The core never creates or deletes entries on its own. Stopping the timer
//! *proposes* a [`CompletedInterval`]; the caller decides whether to submit
//! it to an [`EntryStore`]. Everything downstream (calendar, streaks, stats)
//! consumes the entries the store returns.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageError;

/// A persisted practice interval.
///
/// Timestamps keep the offset they were recorded with; day bucketing uses
/// the entry-local calendar date rather than a UTC-shifted one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub subject_id: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub duration_seconds: u64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The interval proposed by `TimerEngine::stop()`.
///
/// Not yet persisted and carries no id; submitting it to an [`EntryStore`]
/// turns it into a [`TimeEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedInterval {
    pub subject_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: u64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Persistence collaborator for time entries.
///
/// A failed `submit` is surfaced as-is; the core does not retry, and the
/// proposed interval remains the caller's to re-offer or discard.
pub trait EntryStore {
    fn submit(&mut self, interval: CompletedInterval) -> Result<TimeEntry, StorageError>;

    /// List entries, optionally filtered by subject, newest first.
    fn list(&self, subject_id: Option<&str>) -> Result<Vec<TimeEntry>, StorageError>;
}
