//! Environment configuration

use crate::session::DEFAULT_SESSION_TTL_SECS;
use chrono::Duration;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MODEL_PATH: &str = "models/forest.json";
const DEFAULT_LABELS_PATH: &str = "models/labels.json";

/// Runtime configuration, read from `TRIAGE_*` environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageConfig {
    pub port: u16,
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    /// SQLite session database; sessions are kept in memory when unset
    pub db_path: Option<PathBuf>,
    pub session_ttl_secs: i64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            labels_path: PathBuf::from(DEFAULT_LABELS_PATH),
            db_path: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl TriageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable values fall back
    /// to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("TRIAGE_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            model_path: lookup("TRIAGE_MODEL_PATH")
                .map_or(defaults.model_path, PathBuf::from),
            labels_path: lookup("TRIAGE_LABELS_PATH")
                .map_or(defaults.labels_path, PathBuf::from),
            db_path: lookup("TRIAGE_DB_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            session_ttl_secs: lookup("TRIAGE_SESSION_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(defaults.session_ttl_secs),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::seconds(self.session_ttl_secs)
    }
}
