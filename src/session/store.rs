//! Keyed session storage with idle expiry

use super::Session;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Idle seconds after which a session is discarded
pub const DEFAULT_SESSION_TTL_SECS: i64 = 300;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Session store lock poisoned")]
    LockPoisoned,
}

/// Storage for conversation sessions
///
/// Absent, expired and unreadable sessions all read back as a fresh
/// default session; none of them is an error.
pub trait SessionStore: Send + Sync {
    /// Current session for `id`, or a new one if there is none usable
    fn get(&self, id: &str, now: DateTime<Utc>) -> Result<Session, StoreError>;

    fn put(&self, id: &str, session: &Session) -> Result<(), StoreError>;

    fn clear(&self, id: &str) -> Result<(), StoreError>;

    /// Drop every session idle past the TTL; returns how many were removed
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError>;
}

impl<T: SessionStore + ?Sized> SessionStore for std::sync::Arc<T> {
    fn get(&self, id: &str, now: DateTime<Utc>) -> Result<Session, StoreError> {
        (**self).get(id, now)
    }

    fn put(&self, id: &str, session: &Session) -> Result<(), StoreError> {
        (**self).put(id, session)
    }

    fn clear(&self, id: &str) -> Result<(), StoreError> {
        (**self).clear(id)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        (**self).purge_expired(now)
    }
}

/// In-process session store
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map_or(0, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_SESSION_TTL_SECS))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &str, now: DateTime<Utc>) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.lock().map_err(|_| StoreError::LockPoisoned)?;
        let expired = match sessions.get(id) {
            Some(session) if !session.is_expired(now, self.ttl) => return Ok(session.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            tracing::debug!(session_id = %id, "Session expired, starting fresh");
            sessions.remove(id);
        }
        Ok(Session::new(now))
    }

    fn put(&self, id: &str, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().map_err(|_| StoreError::LockPoisoned)?;
        sessions.insert(id.to_string(), session.clone());
        Ok(())
    }

    fn clear(&self, id: &str) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().map_err(|_| StoreError::LockPoisoned)?;
        sessions.remove(id);
        Ok(())
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut sessions = self.sessions.lock().map_err(|_| StoreError::LockPoisoned)?;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, self.ttl));
        Ok(before - sessions.len())
    }
}
