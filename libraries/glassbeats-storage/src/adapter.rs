//! Library adapter: domain rules over the store plus the read-side cache.
//!
//! Owns the hydrated collections (all songs, liked, recently played,
//! playlists) as a keyed cache with targeted invalidation: every mutating
//! call invalidates exactly the collections it affects, and the next read
//! re-fetches. This gives read-after-write consistency per collection
//! without patching cached rows in place.
//!
//! In-memory queue mutations that trigger these calls are never rolled
//! back on store failure; persistence is best-effort and re-hydration on
//! the next read reconciles.

use glassbeats_core::error::Result;
use glassbeats_core::traits::MetadataProvider;
use glassbeats_core::types::{
    LikedSong, NewSong, PlayRecord, Playlist, PlaylistId, Profile, Song, SongId, UpdateProfile,
};
use glassbeats_core::{GlassError, MusicStore};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// The independently cached read-side collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// All songs the user has added
    Songs,

    /// Liked songs and the liked-id set
    Liked,

    /// Recently played log (bounded)
    Recent,

    /// Playlists with songs in position order
    Playlists,
}

/// Outcome of a bulk metadata refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Songs whose stored title differed and were updated
    pub updated: usize,

    /// Songs visited
    pub total: usize,
}

/// Default bound for the recently-played read side.
const RECENT_LIMIT: u32 = 20;

/// Persistence adapter with a keyed read-side cache.
pub struct LibraryAdapter {
    store: Arc<dyn MusicStore>,
    recent_limit: u32,

    all_songs: Option<Vec<Song>>,
    liked: Option<Vec<LikedSong>>,
    liked_ids: Option<HashSet<SongId>>,
    recent: Option<Vec<PlayRecord>>,
    playlists: Option<Vec<Playlist>>,
}

impl LibraryAdapter {
    /// Create an adapter over a store.
    pub fn new(store: Arc<dyn MusicStore>) -> Self {
        Self {
            store,
            recent_limit: RECENT_LIMIT,
            all_songs: None,
            liked: None,
            liked_ids: None,
            recent: None,
            playlists: None,
        }
    }

    /// Override the recently-played bound.
    pub fn with_recent_limit(mut self, limit: u32) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Drop the cached copy of one collection; the next read re-fetches.
    pub fn invalidate(&mut self, collection: Collection) {
        match collection {
            Collection::Songs => self.all_songs = None,
            Collection::Liked => {
                self.liked = None;
                self.liked_ids = None;
            }
            Collection::Recent => self.recent = None,
            Collection::Playlists => self.playlists = None,
        }
    }

    // ===== Read Side =====

    /// All songs, newest first.
    pub async fn all_songs(&mut self) -> Result<&[Song]> {
        if self.all_songs.is_none() {
            self.all_songs = Some(self.store.get_all_songs().await?);
        }
        Ok(self.all_songs.as_deref().unwrap_or(&[]))
    }

    /// Liked songs, newest first.
    pub async fn liked_songs(&mut self) -> Result<&[LikedSong]> {
        self.hydrate_likes().await?;
        Ok(self.liked.as_deref().unwrap_or(&[]))
    }

    /// O(1) membership test against the liked set, queried per rendered row.
    pub async fn is_liked(&mut self, song_id: &SongId) -> Result<bool> {
        self.hydrate_likes().await?;
        Ok(self
            .liked_ids
            .as_ref()
            .is_some_and(|ids| ids.contains(song_id)))
    }

    /// Most recent plays, newest first, bounded.
    pub async fn recently_played(&mut self) -> Result<&[PlayRecord]> {
        if self.recent.is_none() {
            self.recent = Some(self.store.get_recent_plays(self.recent_limit).await?);
        }
        Ok(self.recent.as_deref().unwrap_or(&[]))
    }

    /// Playlists with songs in position order.
    pub async fn playlists(&mut self) -> Result<&[Playlist]> {
        if self.playlists.is_none() {
            self.playlists = Some(self.store.get_playlists().await?);
        }
        Ok(self.playlists.as_deref().unwrap_or(&[]))
    }

    /// One playlist by id, from the hydrated collection.
    pub async fn playlist(&mut self, id: &PlaylistId) -> Result<Option<Playlist>> {
        Ok(self.playlists().await?.iter().find(|p| &p.id == id).cloned())
    }

    async fn hydrate_likes(&mut self) -> Result<()> {
        if self.liked.is_none() {
            let liked = self.store.get_likes().await?;
            self.liked_ids = Some(liked.iter().map(|l| l.song.id.clone()).collect());
            self.liked = Some(liked);
        }
        Ok(())
    }

    // ===== Songs =====

    /// Persist a song, de-duplicated by video identifier.
    ///
    /// When a record with the same video id already exists its persisted
    /// row is reused; otherwise a new row is inserted. Rapid successive
    /// calls can reach the store out of order, which is why matching is by
    /// video id rather than row id.
    pub async fn add_song(&mut self, song: &Song) -> Result<Song> {
        if let Some(existing) = self
            .all_songs()
            .await?
            .iter()
            .find(|s| s.video_id == song.video_id)
        {
            return Ok(existing.clone());
        }

        let created = self.store.insert_song(NewSong::from(song)).await?;
        self.invalidate(Collection::Songs);
        Ok(created)
    }

    /// Delete a song everywhere it is referenced.
    pub async fn delete_song(&mut self, song_id: &SongId) -> Result<()> {
        self.store.delete_song(song_id).await?;
        self.invalidate(Collection::Songs);
        self.invalidate(Collection::Liked);
        self.invalidate(Collection::Recent);
        self.invalidate(Collection::Playlists);
        Ok(())
    }

    // ===== Likes =====

    /// Toggle the like on a song; returns whether it is liked afterwards.
    ///
    /// Read-before-write: membership in the hydrated liked set decides
    /// whether the association row is inserted or deleted.
    pub async fn toggle_like(&mut self, song: &Song) -> Result<bool> {
        let persisted = self.add_song(song).await?;
        let was_liked = self.is_liked(&persisted.id).await?;

        if was_liked {
            self.store.delete_like(&persisted.id).await?;
        } else {
            self.store.insert_like(&persisted.id).await?;
        }
        self.invalidate(Collection::Liked);
        Ok(!was_liked)
    }

    // ===== Playlists =====

    /// Create a playlist. Empty names are a user-input error and nothing
    /// is sent to the store.
    pub async fn create_playlist(&mut self, name: &str) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GlassError::invalid_input("playlist name cannot be empty"));
        }

        let playlist = self.store.create_playlist(name).await?;
        self.invalidate(Collection::Playlists);
        Ok(playlist)
    }

    /// Rename a playlist. Empty names are rejected the same way.
    pub async fn rename_playlist(&mut self, id: &PlaylistId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GlassError::invalid_input("playlist name cannot be empty"));
        }

        self.store.rename_playlist(id, name).await?;
        self.invalidate(Collection::Playlists);
        Ok(())
    }

    /// Delete a playlist and its membership rows.
    pub async fn delete_playlist(&mut self, id: &PlaylistId) -> Result<()> {
        self.store.delete_playlist(id).await?;
        self.invalidate(Collection::Playlists);
        Ok(())
    }

    /// Append a song to a playlist.
    ///
    /// The new position is one past the highest occupied one; this
    /// operation never inserts mid-list.
    pub async fn add_to_playlist(&mut self, playlist_id: &PlaylistId, song: &Song) -> Result<()> {
        let persisted = self.add_song(song).await?;
        let position = self
            .store
            .max_playlist_position(playlist_id)
            .await?
            .map_or(0, |max| max + 1);

        self.store
            .add_song_to_playlist(playlist_id, &persisted.id, position)
            .await?;
        self.invalidate(Collection::Playlists);
        Ok(())
    }

    // ===== Play History =====

    /// Append one play to the history log.
    pub async fn record_play(&mut self, song_id: &SongId) -> Result<()> {
        self.store.record_play(song_id).await?;
        self.invalidate(Collection::Recent);
        Ok(())
    }

    // ===== Metadata Refresh =====

    /// Re-fetch canonical metadata for every known song, updating rows
    /// whose title drifted.
    ///
    /// Sequential and partial-failure tolerant: a song whose fetch or
    /// update fails is logged and skipped, and the batch carries on. The
    /// summary reports a success count, not a failure list.
    pub async fn refresh_all_metadata(
        &mut self,
        provider: &dyn MetadataProvider,
    ) -> Result<RefreshSummary> {
        let songs = self.all_songs().await?.to_vec();
        let total = songs.len();
        let mut updated = 0;

        for song in songs {
            let metadata = match provider.fetch_metadata(&song.video_id).await {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!(video_id = %song.video_id, error = %err, "metadata fetch failed");
                    continue;
                }
            };

            if metadata.title == song.title {
                continue;
            }

            match self
                .store
                .update_song_metadata(&song.id, &metadata.title, &metadata.artist, &metadata.thumbnail)
                .await
            {
                Ok(()) => updated += 1,
                Err(err) => {
                    warn!(song_id = %song.id, error = %err, "metadata update failed");
                }
            }
        }

        if updated > 0 {
            self.invalidate(Collection::Songs);
        }
        info!(updated, total, "metadata refresh finished");
        Ok(RefreshSummary { updated, total })
    }

    // ===== Profile =====

    /// The user's profile, when one exists.
    pub async fn profile(&mut self) -> Result<Option<Profile>> {
        self.store.get_profile().await
    }

    /// Apply a partial profile update.
    pub async fn update_profile(&mut self, update: UpdateProfile) -> Result<()> {
        self.store.update_profile(update).await
    }

    /// Upload an avatar blob; returns its public URL.
    pub async fn upload_avatar(&mut self, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        self.store.upload_avatar(bytes, content_type).await
    }
}
