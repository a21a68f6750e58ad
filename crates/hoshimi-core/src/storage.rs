use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::HoshimiError;
use crate::state::State;

const SCHEMA_V1: &str = include_str!("../../../migrations/001_persisted_state.sql");

/// SQLite-backed durable storage for serialized state trees.
pub struct StateStorage {
    conn: Connection,
}

impl StateStorage {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, HoshimiError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, HoshimiError> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Write the whole state tree under `key`, replacing any previous copy.
    pub fn save(&self, key: &str, state: &State) -> Result<(), HoshimiError> {
        let value = serde_json::to_string(state)?;
        self.conn.execute(
            "INSERT INTO persisted_state (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Read the state tree stored under `key`, if any.
    pub fn load(&self, key: &str) -> Result<Option<State>, HoshimiError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM persisted_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Drop the state tree stored under `key`.
    pub fn clear(&self, key: &str) -> Result<(), HoshimiError> {
        self.conn
            .execute("DELETE FROM persisted_state WHERE key = ?1", params![key])?;
        Ok(())
    }
}

fn run_migrations(conn: &Connection) -> Result<(), HoshimiError> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap_or(0);

    if version < 1 {
        conn.execute_batch(SCHEMA_V1)?;
        conn.pragma_update(None, "user_version", 1)?;
    }
    Ok(())
}
