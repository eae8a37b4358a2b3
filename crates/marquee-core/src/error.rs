//! Error types for Marquee Core

use thiserror::Error;

/// Result type alias for shell operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shell error types
#[derive(Error, Debug)]
pub enum Error {
    // Player handle errors
    #[error("Player handle has been destroyed")]
    PlayerDestroyed,

    #[error("Player rejected operation: {0}")]
    PlayerRejected(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Playlist is empty")]
    EmptyPlaylist,

    // Event surface errors
    #[error("Event channel closed")]
    EventChannelClosed,

    #[error("Failed to decode event payload: {0}")]
    EventDecode(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for log records
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::PlayerDestroyed => "PLAYER_DESTROYED",
            Error::PlayerRejected(_) => "PLAYER_REJECTED",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::EmptyPlaylist => "EMPTY_PLAYLIST",
            Error::EventChannelClosed => "EVENT_CHANNEL_CLOSED",
            Error::EventDecode(_) => "EVENT_DECODE",
            Error::Internal(_) => "INTERNAL",
            Error::Io(_) => "IO",
            Error::Json(_) => "JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::PlayerDestroyed.error_code(), "PLAYER_DESTROYED");
        assert_eq!(Error::EmptyPlaylist.error_code(), "EMPTY_PLAYLIST");
        assert_eq!(
            Error::InvalidConfig("bad".into()).error_code(),
            "INVALID_CONFIG"
        );
    }
}
