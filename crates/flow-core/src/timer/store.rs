//! Durable single-slot persistence for the active timer session.
//!
//! One well-known key holds the serialized session so an active timer
//! survives process restarts. The slot is written after every state
//! mutation that leaves something worth restoring, and cleared on
//! `stop()`/`reset()`.

use std::collections::HashMap;

use serde::Deserialize;

use super::engine::TimerSession;
use crate::error::StorageError;

/// Default slot key for the single active timer session.
pub const SESSION_KEY: &str = "flow_active_timer";

/// Durable key-value store backing the session slot.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory session store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slots: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// Stored session shape, including fields from older builds.
///
/// Earlier versions persisted the subject under `skill_id`. The load path
/// folds that into `subject_id`; the current shape never carries both.
#[derive(Deserialize)]
struct StoredSession {
    #[serde(default)]
    is_running: bool,
    #[serde(default)]
    start_epoch_ms: Option<u64>,
    #[serde(default)]
    elapsed_seconds: u64,
    #[serde(default)]
    subject_id: Option<String>,
    #[serde(default)]
    skill_id: Option<String>,
}

/// Decode a persisted session, migrating legacy field names.
pub(crate) fn decode_session(json: &str) -> Result<TimerSession, serde_json::Error> {
    let raw: StoredSession = serde_json::from_str(json)?;
    Ok(TimerSession {
        is_running: raw.is_running,
        start_epoch_ms: raw.start_epoch_ms,
        elapsed_seconds: raw.elapsed_seconds,
        subject_id: raw.subject_id.or(raw.skill_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_current_shape() {
        let session = decode_session(
            r#"{"is_running":true,"start_epoch_ms":1000,"elapsed_seconds":5,"subject_id":"piano"}"#,
        )
        .unwrap();
        assert!(session.is_running);
        assert_eq!(session.start_epoch_ms, Some(1000));
        assert_eq!(session.subject_id.as_deref(), Some("piano"));
    }

    #[test]
    fn migrates_legacy_skill_id() {
        let session = decode_session(
            r#"{"is_running":false,"elapsed_seconds":30,"skill_id":"guitar"}"#,
        )
        .unwrap();
        assert_eq!(session.subject_id.as_deref(), Some("guitar"));
        assert_eq!(session.elapsed_seconds, 30);
    }

    #[test]
    fn subject_id_wins_over_legacy_field() {
        let session =
            decode_session(r#"{"subject_id":"new","skill_id":"old"}"#).unwrap();
        assert_eq!(session.subject_id.as_deref(), Some("new"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(decode_session("not json").is_err());
    }
}
