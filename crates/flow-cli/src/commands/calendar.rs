use chrono::{Datelike, Local};
use clap::Subcommand;

use flow_core::activity::{
    bucket_by_day, build_week_grid, consistency_pct, current_streak, GridCell, Intensity,
    WeekGrid,
};
use flow_core::entry::EntryStore;
use flow_core::storage::{Config, Database, HeatmapConfig};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Render the year heatmap
    Heatmap {
        /// Year to display (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Only entries for this subject
        #[arg(long)]
        subject: Option<String>,
        /// Print the grid as JSON instead of glyphs
        #[arg(long)]
        json: bool,
    },
    /// Current consecutive-day streak
    Streak {
        /// Only entries for this subject
        #[arg(long)]
        subject: Option<String>,
    },
}

const DOW_LABELS: [&str; 7] = ["   ", "Mon", "   ", "Wed", "   ", "Fri", "   "];

fn render_heatmap(grid: &WeekGrid, cfg: &HeatmapConfig) -> String {
    let glyphs: Vec<char> = cfg.glyphs.chars().collect();
    let blank = cfg.blank.chars().next().unwrap_or(' ');
    let glyph = |intensity: Intensity| -> char {
        let idx = match intensity {
            Intensity::None => 0,
            Intensity::Low => 1,
            Intensity::Medium => 2,
            Intensity::High => 3,
        };
        glyphs.get(idx).copied().unwrap_or(blank)
    };

    // One row per weekday, Sunday first; one column per week.
    let mut out = String::new();
    for dow in 0..7 {
        out.push_str(DOW_LABELS[dow]);
        out.push(' ');
        for week in &grid.weeks {
            match &week[dow] {
                GridCell::Blank => out.push(blank),
                GridCell::Day(day) => out.push(glyph(day.intensity)),
            }
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "    less {} more\n",
        glyphs.iter().collect::<String>()
    ));
    out
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let today = Local::now().date_naive();

    match action {
        CalendarAction::Heatmap {
            year,
            subject,
            json,
        } => {
            let config = Config::load()?;
            let year = year.unwrap_or_else(|| today.year());
            let entries = db.list(subject.as_deref())?;
            let buckets = bucket_by_day(&entries);
            let grid = build_week_grid(year, &buckets);

            if json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                println!("{year}");
                print!("{}", render_heatmap(&grid, &config.heatmap));
                println!(
                    "streak: {} day(s), consistency: {:.2}%",
                    current_streak(&buckets, today),
                    consistency_pct(&buckets, year),
                );
            }
        }
        CalendarAction::Streak { subject } => {
            let entries = db.list(subject.as_deref())?;
            let buckets = bucket_by_day(&entries);
            let streak = current_streak(&buckets, today);
            println!("{}", serde_json::json!({ "current_streak": streak }));
        }
    }

    Ok(())
}
