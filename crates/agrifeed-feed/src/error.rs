use thiserror::Error;

use crate::session::Navigation;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("store error: {0}")]
    Store(#[from] agrifeed_store::StoreError),

    #[error("type error: {0}")]
    Type(#[from] agrifeed_types::TypeError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("corrupt id counter: {0:?}")]
    CorruptCounter(String),
}

pub type FeedResult<T> = Result<T, FeedError>;

/// Why the composer refused a submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// The viewer must log in first; callers navigate to the login surface.
    #[error("you must be logged in to post")]
    NotLoggedIn,

    #[error("post content cannot be empty")]
    EmptyContent,

    /// Logged in, but no username is stored for the session.
    #[error("no username stored for this session")]
    MissingUsername,

    /// The view has not been activated, so it has no collection to append to.
    #[error("view is not active")]
    Inactive,
}

impl ComposeError {
    /// Where the caller should send the viewer after this rejection.
    pub fn navigation(&self) -> Navigation {
        match self {
            Self::NotLoggedIn => Navigation::Login,
            Self::EmptyContent | Self::MissingUsername | Self::Inactive => Navigation::Stay,
        }
    }
}
