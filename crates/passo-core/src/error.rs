//! Error types for Passo core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Passo operations.
pub type Result<T> = std::result::Result<T, PassoError>;

/// Core error type for Passo operations.
#[derive(Debug, Error)]
pub enum PassoError {
    /// A persisted blob (or remote secret) is present but cannot be decoded.
    ///
    /// Never equivalent to "empty vault": the caller must keep whatever
    /// state it already has.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The remote store is unreachable or not configured
    #[error("Remote backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Device storage refused a write (quota, permissions, missing directory)
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// The remote store rejected an insert, update or delete
    #[error("Remote operation failed: {0}")]
    RemoteOperation(String),

    /// Key material could not be created or parsed
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Device storage read error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PassoError {
    /// Whether this failure means "the stored data is unusable" rather than
    /// "the operation could not run".
    pub fn is_decode(&self) -> bool {
        matches!(self, PassoError::Decode(_))
    }
}

impl From<std::io::Error> for PassoError {
    fn from(err: std::io::Error) -> Self {
        PassoError::Storage(err.to_string())
    }
}
