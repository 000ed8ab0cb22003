//! Song domain types

use crate::types::{SongId, UserId, VideoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playable track.
///
/// The persisted row id is `id`; the identity used for de-duplication is
/// `video_id` (two records with different ids but the same `video_id` are
/// the same underlying track and must be coalesced before persisting).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier from the store
    pub id: SongId,

    /// Track title
    pub title: String,

    /// Artist name (the uploading channel when nothing better is known)
    pub artist: String,

    /// External video identifier for the embedded player
    pub video_id: VideoId,

    /// Artwork URL
    pub thumbnail: String,

    /// Track duration in seconds, when known
    pub duration_seconds: Option<u32>,

    /// Owning user, when the record came from the store
    pub user_id: Option<UserId>,

    /// Creation timestamp, when the record came from the store
    pub created_at: Option<DateTime<Utc>>,
}

impl Song {
    /// Create a transient song from a video identifier and metadata.
    ///
    /// The generated id is client-local until the store assigns one.
    pub fn from_video(video_id: VideoId, title: impl Into<String>, artist: impl Into<String>) -> Self {
        let thumbnail = video_id.default_thumbnail();
        Self {
            id: SongId::generate(),
            title: title.into(),
            artist: artist.into(),
            video_id,
            thumbnail,
            duration_seconds: None,
            user_id: None,
            created_at: None,
        }
    }

    /// Placeholder song used when the metadata service is unreachable.
    pub fn placeholder(video_id: VideoId) -> Self {
        Self::from_video(video_id, "YouTube Video", "Unknown Artist")
    }
}

/// Payload for inserting a song into the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSong {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// External video identifier
    pub video_id: VideoId,

    /// Artwork URL
    pub thumbnail: String,

    /// Track duration in seconds, when known
    pub duration_seconds: Option<u32>,
}

impl From<&Song> for NewSong {
    fn from(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
            video_id: song.video_id.clone(),
            thumbnail: song.thumbnail.clone(),
            duration_seconds: song.duration_seconds,
        }
    }
}

/// Canonical metadata for an external video, as returned by the metadata
/// service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Track title
    pub title: String,

    /// Artist name (the uploading channel)
    pub artist: String,

    /// Artwork URL
    pub thumbnail: String,

    /// Track duration in seconds, when the service reports one
    pub duration_seconds: Option<u32>,
}

/// A liked song with its membership timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedSong {
    /// The liked song
    pub song: Song,

    /// When the like was recorded
    pub liked_at: DateTime<Utc>,
}

/// One entry of the append-only play history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// The played song
    pub song: Song,

    /// When playback of the song started
    pub played_at: DateTime<Utc>,
}
