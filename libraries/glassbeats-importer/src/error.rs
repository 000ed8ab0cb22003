//! Error types for the importer clients.

use glassbeats_core::GlassError;
use thiserror::Error;

/// Errors raised by the external metadata/search/import clients.
#[derive(Debug, Error)]
pub enum ImportError {
    /// User-supplied input did not parse (bad URL, unknown shape)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The proxy service is offline or unreachable
    #[error("Service unreachable: {0}")]
    Unreachable(String),

    /// The proxy service returned an error response
    #[error("Service error ({status}): {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Response body, when any
        message: String,
    },

    /// Failed to parse a service response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ImportError {
    /// Create an invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<ImportError> for GlassError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::InvalidInput(msg) => GlassError::InvalidInput(msg),
            other => GlassError::network(other.to_string()),
        }
    }
}

/// Result type for importer operations.
pub type Result<T> = std::result::Result<T, ImportError>;
