//! Model error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or querying the trained classifier
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model artifact not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid model: {0}")]
    Invalid(String),
    #[error("Feature vector has {got} entries, model expects {expected}")]
    FeatureMismatch { expected: usize, got: usize },
    #[error("Unknown class id: {0}")]
    UnknownClass(usize),
}

impl ModelError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
