//! Store trait for the hosted relational store
//!
//! Abstracts the backend-as-a-service so the persistence adapter can be
//! exercised against a fake in tests.

use crate::error::Result;
use crate::types::{
    LikedSong, NewSong, PlayRecord, Playlist, PlaylistId, Profile, Song, SongId, UpdateProfile,
    UserId,
};
use async_trait::async_trait;

/// Access to the hosted store, scoped to an authenticated identity.
///
/// Every call is an asynchronous round trip; completion order of independent
/// mutations is not guaranteed, and callers must not depend on it.
#[async_trait]
pub trait MusicStore: Send + Sync {
    /// The authenticated user this store is scoped to
    fn user_id(&self) -> UserId;

    // ========================================================================
    // Songs
    // ========================================================================

    /// Get all songs, newest first
    async fn get_all_songs(&self) -> Result<Vec<Song>>;

    /// Insert a song row
    async fn insert_song(&self, song: NewSong) -> Result<Song>;

    /// Update a song's canonical metadata
    async fn update_song_metadata(
        &self,
        id: &SongId,
        title: &str,
        artist: &str,
        thumbnail: &str,
    ) -> Result<()>;

    /// Delete a song row (cascades likes and playlist memberships)
    async fn delete_song(&self, id: &SongId) -> Result<()>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Get the user's playlists with songs in position order
    async fn get_playlists(&self) -> Result<Vec<Playlist>>;

    /// Create a playlist
    async fn create_playlist(&self, name: &str) -> Result<Playlist>;

    /// Rename a playlist
    async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<()>;

    /// Delete a playlist and its membership rows
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()>;

    /// Append a song to a playlist at the given position
    async fn add_song_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        position: u32,
    ) -> Result<()>;

    /// Highest occupied position in a playlist, when it has any songs
    async fn max_playlist_position(&self, playlist_id: &PlaylistId) -> Result<Option<u32>>;

    // ========================================================================
    // Likes
    // ========================================================================

    /// Get all liked songs, newest first
    async fn get_likes(&self) -> Result<Vec<LikedSong>>;

    /// Insert a like association row
    async fn insert_like(&self, song_id: &SongId) -> Result<()>;

    /// Delete a like association row
    async fn delete_like(&self, song_id: &SongId) -> Result<()>;

    // ========================================================================
    // Play history
    // ========================================================================

    /// Append one play to the history log
    async fn record_play(&self, song_id: &SongId) -> Result<()>;

    /// Get the most recent plays, newest first, bounded by `limit`
    async fn get_recent_plays(&self, limit: u32) -> Result<Vec<PlayRecord>>;

    // ========================================================================
    // Profile
    // ========================================================================

    /// Get the user's profile, when one exists
    async fn get_profile(&self) -> Result<Option<Profile>>;

    /// Apply a partial profile update
    async fn update_profile(&self, update: UpdateProfile) -> Result<()>;

    /// Upload an avatar blob; returns its public URL
    async fn upload_avatar(&self, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}
