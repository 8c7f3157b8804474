//! Error types for contact storage backends

use std::io;
use thiserror::Error;
use xport_core::ContactId;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by contact stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error (directory backend)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Contact id not present in the store
    #[error("contact not found: {0}")]
    NotFound(ContactId),

    /// Stored document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend name does not match any available backend
    #[error("backend not available: '{name}' (available: {available})")]
    UnknownBackend {
        /// Requested name
        name: String,
        /// Comma-separated list of available names
        available: String,
    },

    /// Failure injected by the testing wrapper
    #[error("injected failure in {0}")]
    Injected(&'static str),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
