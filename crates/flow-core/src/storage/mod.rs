mod config;
pub mod database;

pub use config::{Config, HeatmapConfig, TimerConfig};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/flow[-dev]/` based on FLOW_ENV.
///
/// Set FLOW_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("flow-dev")
    } else {
        base_dir.join("flow")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
