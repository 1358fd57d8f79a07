//! Practice timer engine.
//!
//! The engine is a wall-clock-based state machine over a single session.
//! It does not use internal threads - the caller is responsible for calling
//! `tick()` periodically (once per second is plenty) and for stopping its
//! own tick loop once the engine leaves `Running`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Idle
//! ```
//!
//! Every mutation persists the session to a durable single-slot store, so a
//! running timer survives restarts; on load the elapsed time is reconciled
//! from the wall clock rather than the stored display value.

use chrono::DateTime;
use log::warn;
use serde::{Deserialize, Serialize};

use super::store::{decode_session, SessionStore, SESSION_KEY};
use crate::clock::{Clock, SystemClock};
use crate::entry::CompletedInterval;
use crate::error::Result;

/// Derived engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// The single active session.
///
/// Invariant: `is_running` implies `start_epoch_ms` is present. On resume
/// `start_epoch_ms` is shifted back by the accumulated elapsed time so
/// ticking stays consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TimerSession {
    pub is_running: bool,
    pub start_epoch_ms: Option<u64>,
    pub elapsed_seconds: u64,
    pub subject_id: Option<String>,
}

/// Core timer engine.
///
/// Owns the session slot store and a clock. There is exactly one engine
/// (and one persisted slot) per application instance; `start()` while a
/// session exists silently replaces it, so callers gate transitions in
/// their UI.
#[derive(Debug)]
pub struct TimerEngine<S: SessionStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    key: String,
    session: TimerSession,
}

impl<S: SessionStore, C: Clock> TimerEngine<S, C> {
    /// Restore the engine from the default session slot.
    ///
    /// A missing or corrupt slot yields an idle engine; corruption is
    /// logged and discarded, never surfaced to the caller.
    pub fn load(store: S, clock: C) -> Self {
        Self::load_with_key(store, clock, SESSION_KEY)
    }

    /// Restore the engine from a configurable slot key.
    pub fn load_with_key(store: S, clock: C, key: &str) -> Self {
        let session = match store.get(key) {
            Ok(Some(json)) => match decode_session(&json) {
                Ok(session) => restore(session, &clock),
                Err(e) => {
                    warn!("discarding corrupt timer session: {e}");
                    TimerSession::default()
                }
            },
            Ok(None) => TimerSession::default(),
            Err(e) => {
                warn!("failed to read timer session slot: {e}");
                TimerSession::default()
            }
        };
        Self {
            store,
            clock,
            key: key.to_string(),
            session,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.session.is_running {
            TimerState::Running
        } else if self.session.elapsed_seconds > 0 {
            TimerState::Paused
        } else {
            TimerState::Idle
        }
    }

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.session.elapsed_seconds
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.session.subject_id.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the engine and hand back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin timing `subject_id` from zero. Replaces any existing session.
    pub fn start(&mut self, subject_id: impl Into<String>) -> Result<()> {
        self.session = TimerSession {
            is_running: true,
            start_epoch_ms: Some(self.clock.now_ms()),
            elapsed_seconds: 0,
            subject_id: Some(subject_id.into()),
        };
        self.persist()
    }

    /// Recompute elapsed time from the wall clock. Call periodically while
    /// `Running`; a no-op otherwise. Returns the current elapsed seconds.
    pub fn tick(&mut self) -> Result<u64> {
        if self.session.is_running {
            self.flush_elapsed();
            self.persist()?;
        }
        Ok(self.session.elapsed_seconds)
    }

    /// `Running` -> `Paused`. Elapsed time is retained.
    pub fn pause(&mut self) -> Result<()> {
        if !self.session.is_running {
            return Ok(());
        }
        self.flush_elapsed();
        self.session.is_running = false;
        self.persist()
    }

    /// `Paused` -> `Running`. No-op unless time has already accumulated.
    pub fn resume(&mut self) -> Result<()> {
        if self.session.is_running || self.session.elapsed_seconds == 0 {
            return Ok(());
        }
        // Shift the start instant back so continued ticking lines up with
        // the already-accumulated elapsed time.
        let adjusted = self
            .clock
            .now_ms()
            .saturating_sub(self.session.elapsed_seconds * 1000);
        self.session.start_epoch_ms = Some(adjusted);
        self.session.is_running = true;
        self.persist()
    }

    /// End the session and propose the completed interval to the caller.
    ///
    /// Returns `None` when there is nothing to stop. Any non-idle session
    /// always transitions to `Idle` and its slot is cleared, even when no
    /// interval can be proposed from it (a restored slot may lack a
    /// subject). Persisting the interval is the caller's responsibility;
    /// the engine only clears its own state and the session slot.
    pub fn stop(&mut self) -> Result<Option<CompletedInterval>> {
        if self.state() == TimerState::Idle {
            return Ok(None);
        }
        if self.session.is_running {
            self.flush_elapsed();
        }
        let interval = match (
            self.session.start_epoch_ms,
            self.session.subject_id.clone(),
        ) {
            (Some(start_ms), Some(subject_id)) => {
                match DateTime::from_timestamp_millis(start_ms as i64) {
                    Some(start_time) => Some(CompletedInterval {
                        subject_id,
                        start_time,
                        end_time: self.clock.now(),
                        duration_seconds: self.session.elapsed_seconds,
                        notes: None,
                    }),
                    None => {
                        // Unrepresentable instant in the slot; discard it.
                        warn!("discarding timer session with out-of-range start instant");
                        None
                    }
                }
            }
            _ => {
                warn!("discarding timer session without a subject");
                None
            }
        };
        self.clear()?;
        Ok(interval)
    }

    /// Discard the session without proposing an interval.
    pub fn reset(&mut self) -> Result<()> {
        self.clear()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self) {
        if let Some(start) = self.session.start_epoch_ms {
            let now = self.clock.now_ms();
            self.session.elapsed_seconds = now.saturating_sub(start) / 1000;
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.session = TimerSession::default();
        self.store.delete(&self.key)?;
        Ok(())
    }

    /// Write the session to its slot when there is something to restore.
    fn persist(&mut self) -> Result<()> {
        if self.session.is_running || self.session.elapsed_seconds > 0 {
            let json = serde_json::to_string(&self.session)?;
            self.store.set(&self.key, &json)?;
        }
        Ok(())
    }
}

/// Reconcile a freshly loaded session with the current wall clock.
///
/// A session that was running while the process was down accumulates the
/// downtime: elapsed time is recomputed from `start_epoch_ms` instead of
/// trusting the stored display value. Paused sessions restore verbatim.
fn restore<C: Clock>(mut session: TimerSession, clock: &C) -> TimerSession {
    match (session.is_running, session.start_epoch_ms) {
        (true, Some(start)) => {
            session.elapsed_seconds = clock.now_ms().saturating_sub(start) / 1000;
            session
        }
        (true, None) => {
            // Running without a start instant violates the invariant.
            warn!("discarding timer session missing its start instant");
            TimerSession::default()
        }
        (false, _) => session,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::timer::store::MemorySessionStore;

    fn engine_at(epoch_ms: u64) -> (TimerEngine<MemorySessionStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new(epoch_ms);
        let engine = TimerEngine::load(MemorySessionStore::new(), clock.clone());
        (engine, clock)
    }

    #[test]
    fn starts_idle() {
        let (engine, _) = engine_at(0);
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.elapsed_seconds(), 0);
    }

    #[test]
    fn elapsed_is_monotonic_while_running() {
        let (mut engine, clock) = engine_at(1_000_000);
        engine.start("piano").unwrap();
        let mut last = 0;
        for _ in 0..5 {
            clock.advance_secs(3);
            let elapsed = engine.tick().unwrap();
            assert!(elapsed >= last);
            last = elapsed;
        }
        assert_eq!(last, 15);
    }

    #[test]
    fn pause_resume_continuity() {
        let (mut engine, clock) = engine_at(1_000_000);
        engine.start("piano").unwrap();
        clock.advance_secs(10);
        engine.pause().unwrap();
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.elapsed_seconds(), 10);

        // Wall-clock time passing while paused does not count.
        clock.advance_secs(300);
        engine.resume().unwrap();
        clock.advance_secs(5);
        assert_eq!(engine.tick().unwrap(), 15);
    }

    #[test]
    fn stop_returns_exact_duration() {
        let clock = ManualClock::at("2025-01-01T10:00:00Z");
        let mut engine = TimerEngine::load(MemorySessionStore::new(), clock.clone());
        engine.start("piano").unwrap();
        clock.advance_secs(45);

        let interval = engine.stop().unwrap().expect("active session");
        assert_eq!(interval.subject_id, "piano");
        assert_eq!(interval.duration_seconds, 45);
        assert_eq!(interval.start_time.to_rfc3339(), "2025-01-01T10:00:00+00:00");
        assert_eq!(interval.end_time.to_rfc3339(), "2025-01-01T10:00:45+00:00");
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn stop_from_paused_keeps_accumulated_time() {
        let (mut engine, clock) = engine_at(1_000_000);
        engine.start("piano").unwrap();
        clock.advance_secs(37);
        engine.pause().unwrap();
        clock.advance_secs(600);

        let interval = engine.stop().unwrap().expect("paused session");
        assert_eq!(interval.duration_seconds, 37);
    }

    #[test]
    fn stop_without_session_is_noop() {
        let (mut engine, _) = engine_at(0);
        assert!(engine.stop().unwrap().is_none());
    }

    #[test]
    fn stop_clears_restored_session_without_subject() {
        let mut store = MemorySessionStore::new();
        store
            .set(
                SESSION_KEY,
                r#"{"is_running":true,"start_epoch_ms":1000,"elapsed_seconds":5}"#,
            )
            .unwrap();

        let mut engine = TimerEngine::load(store, ManualClock::new(10_000));
        assert_eq!(engine.state(), TimerState::Running);

        // No subject means nothing to propose, but the session still ends.
        assert!(engine.stop().unwrap().is_none());
        assert_eq!(engine.state(), TimerState::Idle);
        assert!(engine.store().get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn resume_with_no_elapsed_time_is_noop() {
        let (mut engine, _) = engine_at(0);
        engine.resume().unwrap();
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn start_replaces_existing_session() {
        let (mut engine, clock) = engine_at(1_000_000);
        engine.start("piano").unwrap();
        clock.advance_secs(20);
        engine.start("guitar").unwrap();
        assert_eq!(engine.elapsed_seconds(), 0);
        assert_eq!(engine.subject_id(), Some("guitar"));
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn persists_while_running_and_clears_on_stop() {
        let (mut engine, clock) = engine_at(1_000_000);
        engine.start("piano").unwrap();
        clock.advance_secs(5);
        engine.tick().unwrap();
        assert!(engine.store().get(SESSION_KEY).unwrap().is_some());

        engine.stop().unwrap();
        assert!(engine.store().get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn reset_discards_without_result() {
        let (mut engine, clock) = engine_at(1_000_000);
        engine.start("piano").unwrap();
        clock.advance_secs(5);
        engine.tick().unwrap();
        engine.reset().unwrap();
        assert_eq!(engine.state(), TimerState::Idle);
        assert!(engine.store().get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn restore_running_session_accounts_for_downtime() {
        let t0: u64 = 1_700_000_000_000;
        let mut store = MemorySessionStore::new();
        store
            .set(
                SESSION_KEY,
                &format!(
                    r#"{{"is_running":true,"start_epoch_ms":{t0},"elapsed_seconds":3,"subject_id":"x"}}"#
                ),
            )
            .unwrap();

        let clock = ManualClock::new(t0 + 120_000);
        let engine = TimerEngine::load(store, clock);
        assert_eq!(engine.state(), TimerState::Running);
        assert_eq!(engine.elapsed_seconds(), 120);
        assert_eq!(engine.subject_id(), Some("x"));
    }

    #[test]
    fn restore_paused_session_verbatim() {
        let mut store = MemorySessionStore::new();
        store
            .set(
                SESSION_KEY,
                r#"{"is_running":false,"start_epoch_ms":500,"elapsed_seconds":42,"subject_id":"y"}"#,
            )
            .unwrap();

        let engine = TimerEngine::load(store, ManualClock::new(10_000_000));
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.elapsed_seconds(), 42);
    }

    #[test]
    fn restore_legacy_skill_id_slot() {
        let mut store = MemorySessionStore::new();
        store
            .set(
                SESSION_KEY,
                r#"{"is_running":false,"elapsed_seconds":7,"skill_id":"drums"}"#,
            )
            .unwrap();

        let engine = TimerEngine::load(store, ManualClock::new(0));
        assert_eq!(engine.subject_id(), Some("drums"));
    }

    #[test]
    fn corrupt_slot_loads_as_idle() {
        let mut store = MemorySessionStore::new();
        store.set(SESSION_KEY, "{{{ not json").unwrap();

        let engine = TimerEngine::load(store, ManualClock::new(0));
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn running_slot_without_start_instant_loads_as_idle() {
        let mut store = MemorySessionStore::new();
        store
            .set(SESSION_KEY, r#"{"is_running":true,"elapsed_seconds":9}"#)
            .unwrap();

        let engine = TimerEngine::load(store, ManualClock::new(0));
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.elapsed_seconds(), 0);
    }
}
