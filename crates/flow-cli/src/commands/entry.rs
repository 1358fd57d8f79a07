use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;

use flow_core::entry::{CompletedInterval, EntryStore};
use flow_core::storage::Database;

#[derive(Subcommand)]
pub enum EntryAction {
    /// List recorded entries, newest first
    List {
        /// Only entries for this subject
        #[arg(long)]
        subject: Option<String>,
    },
    /// Record a manual entry
    Add {
        /// Goal or skill the time belongs to
        subject_id: String,
        /// Start instant, RFC 3339 (e.g. 2025-01-01T10:00:00Z)
        #[arg(long)]
        start: String,
        /// Duration in seconds
        #[arg(long)]
        duration: u64,
        /// Free-form note attached to the entry
        #[arg(long)]
        notes: Option<String>,
    },
}

pub fn run(action: EntryAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::open()?;

    match action {
        EntryAction::List { subject } => {
            let entries = db.list(subject.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        EntryAction::Add {
            subject_id,
            start,
            duration,
            notes,
        } => {
            let start_time: DateTime<Utc> = start.parse()?;
            let interval = CompletedInterval {
                subject_id,
                start_time,
                end_time: start_time + Duration::seconds(duration as i64),
                duration_seconds: duration,
                notes,
            };
            let entry = db.submit(interval)?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
    }

    Ok(())
}
