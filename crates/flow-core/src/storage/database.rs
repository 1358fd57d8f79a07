//! SQLite-backed time-entry store and session slot.
//!
//! Provides persistent storage for:
//! - Submitted time entries (the [`EntryStore`] collaborator)
//! - The single timer session slot (the [`SessionStore`] collaborator)

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::data_dir;
use crate::entry::{CompletedInterval, EntryStore, TimeEntry};
use crate::error::{CoreError, StorageError};
use crate::timer::SessionStore;

/// SQLite database for time entries and application state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/flow/flow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("flow.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS time_entries (
                id               TEXT PRIMARY KEY,
                subject_id       TEXT NOT NULL,
                start_time       TEXT NOT NULL,
                end_time         TEXT NOT NULL,
                duration_seconds INTEGER NOT NULL,
                notes            TEXT,
                created_at       TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_time_entries_start_time ON time_entries(start_time);
            CREATE INDEX IF NOT EXISTS idx_time_entries_subject_id ON time_entries(subject_id);",
        )?;
        Ok(())
    }

    // ── Key-value slot ───────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn row_to_entry(
        (id, subject_id, start, end, duration_seconds, notes): (
            String,
            String,
            String,
            String,
            u64,
            Option<String>,
        ),
    ) -> Result<TimeEntry, StorageError> {
        Ok(TimeEntry {
            id: Uuid::parse_str(&id)
                .map_err(|e| StorageError::CorruptRecord(format!("entry id {id}: {e}")))?,
            subject_id,
            start_time: DateTime::parse_from_rfc3339(&start)
                .map_err(|e| StorageError::CorruptRecord(format!("start_time {start}: {e}")))?,
            end_time: DateTime::parse_from_rfc3339(&end)
                .map_err(|e| StorageError::CorruptRecord(format!("end_time {end}: {e}")))?,
            duration_seconds,
            notes,
        })
    }
}

impl EntryStore for Database {
    fn submit(&mut self, interval: CompletedInterval) -> Result<TimeEntry, StorageError> {
        let entry = TimeEntry {
            id: Uuid::new_v4(),
            subject_id: interval.subject_id,
            start_time: interval.start_time.fixed_offset(),
            end_time: interval.end_time.fixed_offset(),
            duration_seconds: interval.duration_seconds,
            notes: interval.notes,
        };
        self.conn.execute(
            "INSERT INTO time_entries (id, subject_id, start_time, end_time, duration_seconds, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id.to_string(),
                entry.subject_id,
                entry.start_time.to_rfc3339(),
                entry.end_time.to_rfc3339(),
                entry.duration_seconds,
                entry.notes,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(entry)
    }

    fn list(&self, subject_id: Option<&str>) -> Result<Vec<TimeEntry>, StorageError> {
        let base = "SELECT id, subject_id, start_time, end_time, duration_seconds, notes
             FROM time_entries";
        let map_row = |row: &rusqlite::Row<'_>| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, u64>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        };

        let mut entries = Vec::new();
        match subject_id {
            Some(subject) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{base} WHERE subject_id = ?1 ORDER BY start_time DESC"
                ))?;
                let rows = stmt.query_map(params![subject], map_row)?;
                for row in rows {
                    entries.push(Self::row_to_entry(row?)?);
                }
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{base} ORDER BY start_time DESC"))?;
                let rows = stmt.query_map([], map_row)?;
                for row in rows {
                    entries.push(Self::row_to_entry(row?)?);
                }
            }
        }
        Ok(entries)
    }
}

impl SessionStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.kv_get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.kv_set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.kv_delete(key)
    }
}
