//! Error types for the card store.

use thiserror::Error;

/// Unified error type for card store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend read or write failure.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration error (unusable directory, bad settings).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Could not find a free id after repeated attempts.
    #[error("Id allocation failed after {0} attempts")]
    IdExhausted(usize),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// Create a backend error with the given message.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
