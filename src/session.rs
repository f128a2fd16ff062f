//! Per-conversation session state
//!
//! A session is created on the first turn for an identifier and replaced by
//! a fresh one once it has been idle longer than the store's TTL.

mod store;

pub use store::{MemorySessionStore, SessionStore, StoreError, DEFAULT_SESSION_TTL_SECS};

use crate::prediction::Prediction;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Step of the intake protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Symptom,
    Duration,
    Severity,
    AskRecommendations,
    MoreSymptoms,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Symptom => "symptom",
            Phase::Duration => "duration",
            Phase::Severity => "severity",
            Phase::AskRecommendations => "ask_recommendations",
            Phase::MoreSymptoms => "more_symptoms",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ongoing conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub phase: Phase,
    /// Extracted vocabulary tokens; only membership matters downstream
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    /// At most three, highest probability first
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            phase: Phase::Symptom,
            symptoms: Vec::new(),
            duration: None,
            severity: None,
            predictions: Vec::new(),
            last_active: now,
        }
    }

    /// Idle for strictly longer than `ttl` as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.last_active) > ttl
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active = now;
    }
}
