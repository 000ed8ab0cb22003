//! Playlist domain types

use crate::types::{PlaylistId, Song, SongId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered collection of songs.
///
/// Song order is meaningful (play order and display order) and is persisted
/// through a `position` column on the membership row, separate from any
/// in-memory queue order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Songs in persisted position order
    pub songs: Vec<Song>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Owning user
    pub user_id: Option<UserId>,
}

impl Playlist {
    /// Create a new, empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            songs: Vec::new(),
            created_at: Utc::now(),
            user_id: None,
        }
    }
}

/// Playlist membership row: which song sits at which position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Playlist ID
    pub playlist_id: PlaylistId,

    /// Song ID
    pub song_id: SongId,

    /// Position in the playlist (0-indexed, append-only)
    pub position: u32,
}

impl PlaylistEntry {
    /// Create a new membership row
    pub fn new(playlist_id: PlaylistId, song_id: SongId, position: u32) -> Self {
        Self {
            playlist_id,
            song_id,
            position,
        }
    }
}
