//! Error types for the store client.

use glassbeats_core::GlassError;
use thiserror::Error;

/// Errors that can occur when talking to the hosted store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Store returned an error response
    #[error("Store error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body, when any
        message: String,
    },

    /// Invalid store URL
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a store response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Store is offline or unreachable
    #[error("Store unreachable: {0}")]
    Unreachable(String),
}

impl From<StoreError> for GlassError {
    fn from(err: StoreError) -> Self {
        GlassError::store(err.to_string())
    }
}

/// Result type for store client operations.
pub type Result<T> = std::result::Result<T, StoreError>;
