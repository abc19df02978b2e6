use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IxepredError {
    /// A model artifact is absent or could not be decoded.
    #[error("Model artifact not found or unreadable: {path}: {reason}")]
    ArtifactNotFound { path: PathBuf, reason: String },

    /// Strict alignment rejected a record lacking columns the model expects.
    #[error("Patient record lacks features expected by {endpoint}: {}", .missing.join(", "))]
    SchemaMismatch { endpoint: String, missing: Vec<String> },

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IxepredError {
    /// Errors that abort the current scoring run rather than degrading it.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, IxepredError::SchemaMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, IxepredError>;
