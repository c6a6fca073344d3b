//! Roster loading errors.

use thiserror::Error;

/// Errors that can occur while fetching the character listing
#[derive(Debug, Error)]
pub enum LoadError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Unexpected HTTP status {code}")]
    Status { code: u16 },

    /// The body was not a character listing
    #[error("Malformed character listing: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The load task ended without reporting a result
    #[error("Loader stopped before finishing")]
    Aborted,
}

/// Result type for roster loading
pub type Result<T> = std::result::Result<T, LoadError>;
