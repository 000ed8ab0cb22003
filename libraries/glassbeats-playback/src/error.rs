//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// The embedded widget rejected a command
    #[error("Widget error: {0}")]
    Widget(String),

    /// The background keep-alive channel failed
    #[error("Keep-alive error: {0}")]
    KeepAlive(String),
}

impl PlaybackError {
    /// Create a widget command error
    pub fn widget(msg: impl Into<String>) -> Self {
        Self::Widget(msg.into())
    }

    /// Create a keep-alive error
    pub fn keep_alive(msg: impl Into<String>) -> Self {
        Self::KeepAlive(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
