//! SQLite-backed session store
//!
//! Sessions are stored as JSON next to an RFC 3339 `last_active` column so
//! expiry can be decided in SQL. Timestamps are written with a fixed number
//! of fractional digits, which keeps string comparison chronological.

mod schema;

use schema::SCHEMA;

use crate::session::{Session, SessionStore, StoreError};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Thread-safe session database handle
#[derive(Clone)]
pub struct SqliteSessionStore {
    conn: Arc<Mutex<Connection>>,
    ttl: Duration,
}

impl SqliteSessionStore {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P, ttl: Duration) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            ttl,
        };
        store.run_migrations()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory(ttl: Duration) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            ttl,
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn delete(conn: &Connection, id: &str) -> Result<(), StoreError> {
        conn.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
        Ok(())
    }
}

impl SessionStore for SqliteSessionStore {
    fn get(&self, id: &str, now: DateTime<Utc>) -> Result<Session, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM sessions WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(data) = data else {
            return Ok(Session::new(now));
        };

        match serde_json::from_str::<Session>(&data) {
            Ok(session) if !session.is_expired(now, self.ttl) => Ok(session),
            Ok(_) => {
                tracing::debug!(session_id = %id, "Session expired, starting fresh");
                Self::delete(&conn, id)?;
                Ok(Session::new(now))
            }
            Err(e) => {
                tracing::warn!(session_id = %id, error = %e, "Discarding unreadable session");
                Self::delete(&conn, id)?;
                Ok(Session::new(now))
            }
        }
    }

    fn put(&self, id: &str, session: &Session) -> Result<(), StoreError> {
        let data = serde_json::to_string(session)?;
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO sessions (id, data, last_active) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data, last_active = excluded.last_active",
            params![id, data, timestamp(session.last_active)],
        )?;
        Ok(())
    }

    fn clear(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        Self::delete(&conn, id)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let cutoff = timestamp(now - self.ttl);
        let removed = conn.execute(
            "DELETE FROM sessions WHERE last_active < ?1",
            params![cutoff],
        )?;
        Ok(removed)
    }
}
