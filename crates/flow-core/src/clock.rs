//! Wall-clock abstraction.
//!
//! The timer engine never reads the system time directly. It goes through
//! [`Clock`] so tests can drive time deterministically.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

/// Source of the current wall-clock instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64 {
        self.now().timestamp_millis().max(0) as u64
    }
}

/// Real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests.
///
/// Clones share the same underlying instant, so a test can hand one clone
/// to the engine and keep another to advance time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    epoch_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(epoch_ms: u64) -> Self {
        Self {
            epoch_ms: Rc::new(Cell::new(epoch_ms)),
        }
    }

    /// Start at a parseable RFC 3339 instant. Panics on bad input, so only
    /// suitable for test setup.
    pub fn at(rfc3339: &str) -> Self {
        let dt = DateTime::parse_from_rfc3339(rfc3339).expect("valid RFC 3339 instant");
        Self::new(dt.timestamp_millis().max(0) as u64)
    }

    pub fn set_ms(&self, epoch_ms: u64) {
        self.epoch_ms.set(epoch_ms);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.epoch_ms.set(self.epoch_ms.get() + ms);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance_ms(secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.epoch_ms.get() as i64).unwrap_or_default()
    }

    fn now_ms(&self) -> u64 {
        self.epoch_ms.get()
    }
}
