use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "flow-cli", version, about = "Flow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Practice timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Time entry management
    Entry {
        #[command(subcommand)]
        action: commands::entry::EntryAction,
    },
    /// Activity calendar and streaks
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Practice statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Entry { action } => commands::entry::run(action),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Stats { action } => commands::stats::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
