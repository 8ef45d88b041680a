use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("post id must not be empty")]
    EmptyPostId,

    #[error("serialization error: {0}")]
    Serialization(String),
}
