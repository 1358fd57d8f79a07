//! Practice timer: engine, session persistence, display helpers.

mod engine;
mod store;

pub use engine::{TimerEngine, TimerSession, TimerState};
pub use store::{MemorySessionStore, SessionStore, SESSION_KEY};

/// Format a second count as `HH:MM:SS` for timer displays.
pub fn format_hms(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hrs:02}:{mins:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::format_hms;

    #[test]
    fn formats_zero_padded_clock() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(3600), "01:00:00");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(100 * 3600), "100:00:00");
    }
}
