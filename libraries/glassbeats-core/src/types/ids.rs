//! ID types for GlassBeats entities

use crate::error::GlassError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// User identifier (assigned by the external identity provider)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Song identifier (the persisted row id, stable across sessions)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Create a new song ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random song ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playlist identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Create a new playlist ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random playlist ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The 11-character identifier the embedded media platform uses to address
/// a specific video.
///
/// This is the de-duplication identity for songs: two `Song` records with
/// different row ids but equal `VideoId` represent the same underlying track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

/// External video identifiers are always exactly this long.
pub(crate) const VIDEO_ID_LEN: usize = 11;

impl VideoId {
    /// Parse an 11-character video identifier.
    ///
    /// Accepts only the platform's identifier alphabet
    /// (ASCII alphanumerics, `-`, `_`).
    pub fn parse(id: impl Into<String>) -> Result<Self, GlassError> {
        let id = id.into();
        if id.len() != VIDEO_ID_LEN {
            return Err(GlassError::invalid_input(format!(
                "video id must be {VIDEO_ID_LEN} characters, got {}",
                id.len()
            )));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(GlassError::invalid_input(format!(
                "video id contains invalid characters: {id}"
            )));
        }
        Ok(Self(id))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deterministic thumbnail URL for this video, used when no richer
    /// artwork is known.
    pub fn default_thumbnail(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_id_generation_creates_unique_ids() {
        let id1 = SongId::generate();
        let id2 = SongId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn playlist_id_display() {
        let id = PlaylistId::new("playlist-456");
        assert_eq!(format!("{}", id), "playlist-456");
    }

    #[test]
    fn video_id_accepts_canonical_form() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn video_id_rejects_wrong_length() {
        assert!(VideoId::parse("short").is_err());
        assert!(VideoId::parse("waytoolongtobevalid").is_err());
    }

    #[test]
    fn video_id_rejects_invalid_characters() {
        assert!(VideoId::parse("dQw4w9WgXc!").is_err());
        assert!(VideoId::parse("dQw4w9 gXcQ").is_err());
    }

    #[test]
    fn video_id_default_thumbnail() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(
            id.default_thumbnail(),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg"
        );
    }
}
