//! Wire row types for the store's tables.

use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use glassbeats_core::types::{Playlist, PlaylistId, Song, SongId, UserId, VideoId};
use serde::{Deserialize, Serialize};

/// Row of the `songs` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SongRow {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub video_id: String,
    pub thumbnail: String,
    pub duration_seconds: Option<u32>,
    pub user_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl SongRow {
    pub fn into_song(self) -> Result<Song> {
        let video_id = VideoId::parse(self.video_id)
            .map_err(|e| StoreError::ParseError(format!("bad song row: {e}")))?;
        Ok(Song {
            id: SongId::new(self.id),
            title: self.title,
            artist: self.artist,
            video_id,
            thumbnail: self.thumbnail,
            duration_seconds: self.duration_seconds,
            user_id: self.user_id.map(UserId::new),
            created_at: self.created_at,
        })
    }
}

/// Insert payload for the `songs` table.
#[derive(Debug, Serialize)]
pub(crate) struct NewSongRow<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub video_id: &'a str,
    pub thumbnail: &'a str,
    pub duration_seconds: Option<u32>,
    pub user_id: &'a str,
}

/// Row of the `playlists` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PlaylistRow {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<String>,
}

impl PlaylistRow {
    pub fn into_playlist(self, songs: Vec<Song>) -> Playlist {
        Playlist {
            id: PlaylistId::new(self.id),
            name: self.name,
            songs,
            created_at: self.created_at,
            user_id: self.user_id.map(UserId::new),
        }
    }
}

/// Row of the `playlist_songs` membership table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PlaylistSongRow {
    pub playlist_id: String,
    pub song_id: String,
    pub position: u32,
}

/// Position-only projection of `playlist_songs`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PositionRow {
    pub position: u32,
}

/// Row of the `likes` association table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LikeRow {
    pub song_id: String,
    pub created_at: DateTime<Utc>,
}

/// Row of the `play_history` log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PlayRow {
    pub song_id: String,
    pub played_at: DateTime<Utc>,
}

/// Row of the `profiles` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProfileRow {
    pub user_id: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}
