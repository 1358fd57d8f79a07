use clap::Subcommand;
use serde_json::json;

use flow_core::entry::EntryStore;
use flow_core::storage::{Config, Database};
use flow_core::timer::{format_hms, TimerEngine};
use flow_core::SystemClock;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start timing a subject (replaces any active session)
    Start {
        /// Goal or skill being practiced
        subject_id: String,
    },
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Stop the session and record the completed interval
    Stop {
        /// Print the proposed interval without persisting it
        #[arg(long)]
        discard: bool,
        /// Free-form note attached to the recorded entry
        #[arg(long)]
        notes: Option<String>,
    },
    /// Discard the session without recording anything
    Reset,
    /// Print current timer state as JSON
    Status,
}

fn load_engine() -> Result<TimerEngine<Database, SystemClock>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    Ok(TimerEngine::load_with_key(
        db,
        SystemClock,
        &config.timer.session_key,
    ))
}

fn print_status<S, C>(engine: &TimerEngine<S, C>) -> Result<(), Box<dyn std::error::Error>>
where
    S: flow_core::SessionStore,
    C: flow_core::Clock,
{
    let status = json!({
        "state": engine.state(),
        "session": engine.session(),
        "display": format_hms(engine.elapsed_seconds()),
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = load_engine()?;

    match action {
        TimerAction::Start { subject_id } => {
            engine.start(subject_id)?;
            print_status(&engine)?;
        }
        TimerAction::Pause => {
            engine.pause()?;
            print_status(&engine)?;
        }
        TimerAction::Resume => {
            engine.resume()?;
            print_status(&engine)?;
        }
        TimerAction::Stop { discard, notes } => match engine.stop()? {
            Some(mut interval) => {
                interval.notes = notes;
                if discard {
                    println!("{}", serde_json::to_string_pretty(&interval)?);
                } else {
                    let entry = engine.store_mut().submit(interval)?;
                    println!("{}", serde_json::to_string_pretty(&entry)?);
                }
            }
            None => println!("{{\"type\": \"no_active_session\"}}"),
        },
        TimerAction::Reset => {
            engine.reset()?;
            println!("{{\"type\": \"timer_reset\"}}");
        }
        TimerAction::Status => {
            // Tick to reconcile elapsed time with the wall clock.
            engine.tick()?;
            print_status(&engine)?;
        }
    }

    Ok(())
}
