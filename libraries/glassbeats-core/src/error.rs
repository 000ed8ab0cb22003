//! Core error types for GlassBeats

use crate::types::{PlaylistId, SongId};
use thiserror::Error;

/// Result type alias using `GlassError`
pub type Result<T> = std::result::Result<T, GlassError>;

/// Core error type for GlassBeats
#[derive(Error, Debug)]
pub enum GlassError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: String,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Song not found
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Invalid input (malformed URL, empty name, bad identifier)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error reaching an external collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl GlassError {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}
