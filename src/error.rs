// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a serialized model could not be restored.
#[derive(Debug, Error)]
pub enum MalformedStateError {
    #[error("state is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("state document could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("state is inconsistent: {0}")]
    Inconsistent(String),
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Scoring needs at least one document and one vocabulary entry.
    #[error("model has not learned enough to score documents")]
    EmptyModel,
    #[error("no categories have been learned")]
    NoCategories,
    #[error("malformed model state: {0}")]
    MalformedState(#[from] MalformedStateError),
    #[error("failed to encode model state: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
