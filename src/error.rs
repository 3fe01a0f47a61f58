//! Error types for talking to the game server

use thiserror::Error;

/// Failure while fetching round state from the game server.
///
/// Every variant is transient from the clock's point of view: the clock
/// absorbs it, logs it and keeps counting down.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or other transport failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("server returned status {0}")]
    Status(u16),

    /// Body was not the expected JSON shape
    #[error("malformed round state: {0}")]
    Decode(#[from] serde_json::Error),

    /// Body parsed but carried out-of-range values
    #[error("invalid round state: {0}")]
    InvalidSnapshot(String),
}

impl FetchError {
    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
            FetchError::InvalidSnapshot(_) => "invalid",
        }
    }
}
