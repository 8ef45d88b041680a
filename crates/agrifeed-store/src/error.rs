use std::path::PathBuf;

/// Errors from key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backing file exists but does not hold a string-to-string map.
    #[error("corrupt store file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// The backend cannot serve requests (poisoned lock, closed handle).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
