use chrono::{Datelike, Local};
use clap::Subcommand;
use serde_json::json;

use flow_core::activity::{active_day_count, bucket_by_day, consistency_pct, current_streak};
use flow_core::entry::EntryStore;
use flow_core::storage::Database;
use flow_core::timer::format_hms;
use flow_core::{mastery, TimeEntry};

#[derive(Subcommand)]
pub enum StatsAction {
    /// All-time totals, mastery progress, and current-year consistency
    Summary {
        /// Only entries for this subject
        #[arg(long)]
        subject: Option<String>,
    },
}

fn summary(entries: &[TimeEntry]) -> serde_json::Value {
    let today = Local::now().date_naive();
    let year = today.year();
    let buckets = bucket_by_day(entries);

    let total = mastery::total_seconds(entries);
    let total_hours = total / 3600;

    json!({
        "total_seconds": total,
        "total_display": format_hms(total),
        "total_hours_display": mastery::format_hours(total_hours),
        "mastery_progress_pct": format!("{:.2}", mastery::mastery_progress_pct(total)),
        "mastery_remaining_hours": mastery::remaining_hours(total),
        "current_streak": current_streak(&buckets, today),
        "year": year,
        "active_days": active_day_count(&buckets, year),
        "consistency_pct": format!("{:.2}", consistency_pct(&buckets, year)),
    })
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Summary { subject } => {
            let entries = db.list(subject.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&summary(&entries))?);
        }
    }

    Ok(())
}
