//! Storage Error Types
//!
//! Error types for store open, read, and write failures. Business-level
//! failures (missing maps, duplicate nodes) are handled by service-layer
//! error types.

use std::path::PathBuf;
use thiserror::Error;

/// Key-value store operation errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store at the configured path
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: sled::Error,
    },

    /// The backing store failed mid-operation
    #[error("Store operation failed: {0}")]
    Unavailable(#[from] sled::Error),

    /// A stored document could not be decoded
    #[error("Corrupt document under key '{key}': {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    /// A document could not be encoded for storage
    #[error("Failed to encode document for key '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Create an open failed error
    pub fn open_failed(path: PathBuf, source: sled::Error) -> Self {
        Self::OpenFailed { path, source }
    }

    /// Create a corrupt document error
    pub fn corrupt(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            key: key.into(),
            source,
        }
    }

    /// Create an encode error
    pub fn encode(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Encode {
            key: key.into(),
            source,
        }
    }
}
