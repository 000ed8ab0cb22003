//! `MusicStore` implementation over the hosted store's REST surface.

use crate::client::StoreClient;
use crate::rows::{
    LikeRow, NewSongRow, PlaylistRow, PlaylistSongRow, PlayRow, PositionRow, ProfileRow, SongRow,
};
use async_trait::async_trait;
use glassbeats_core::error::Result;
use glassbeats_core::types::{
    LikedSong, NewSong, PlayRecord, Playlist, PlaylistId, Profile, Song, SongId, UpdateProfile,
    UserId,
};
use glassbeats_core::{GlassError, MusicStore};
use serde_json::json;
use std::collections::HashMap;
use tracing::warn;

/// Hosted-store implementation of `MusicStore`, scoped to one user.
pub struct RestMusicStore {
    client: StoreClient,
    user_id: UserId,
}

impl RestMusicStore {
    /// Create a store context for the given user.
    pub fn new(client: StoreClient, user_id: UserId) -> Self {
        Self { client, user_id }
    }

    fn eq(value: impl std::fmt::Display) -> String {
        format!("eq.{value}")
    }

    /// All song rows for this user, keyed by row id.
    async fn songs_by_id(&self) -> Result<HashMap<String, Song>> {
        let rows: Vec<SongRow> = self
            .client
            .select("songs", &[("user_id", Self::eq(&self.user_id))])
            .await
            .map_err(GlassError::from)?;

        let mut songs = HashMap::with_capacity(rows.len());
        for row in rows {
            let id = row.id.clone();
            songs.insert(id, row.into_song()?);
        }
        Ok(songs)
    }
}

#[async_trait]
impl MusicStore for RestMusicStore {
    fn user_id(&self) -> UserId {
        self.user_id.clone()
    }

    // Songs

    async fn get_all_songs(&self) -> Result<Vec<Song>> {
        let rows: Vec<SongRow> = self
            .client
            .select(
                "songs",
                &[
                    ("user_id", Self::eq(&self.user_id)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await
            .map_err(GlassError::from)?;

        rows.into_iter()
            .map(|row| row.into_song().map_err(GlassError::from))
            .collect()
    }

    async fn insert_song(&self, song: NewSong) -> Result<Song> {
        let payload = NewSongRow {
            title: &song.title,
            artist: &song.artist,
            video_id: song.video_id.as_str(),
            thumbnail: &song.thumbnail,
            duration_seconds: song.duration_seconds,
            user_id: self.user_id.as_str(),
        };
        let mut rows: Vec<SongRow> = self
            .client
            .insert("songs", &payload)
            .await
            .map_err(GlassError::from)?;

        match rows.pop() {
            Some(row) => Ok(row.into_song()?),
            None => Err(GlassError::store("insert returned no song row")),
        }
    }

    async fn update_song_metadata(
        &self,
        id: &SongId,
        title: &str,
        artist: &str,
        thumbnail: &str,
    ) -> Result<()> {
        self.client
            .update(
                "songs",
                &[("id", Self::eq(id))],
                &json!({ "title": title, "artist": artist, "thumbnail": thumbnail }),
            )
            .await
            .map_err(GlassError::from)
    }

    async fn delete_song(&self, id: &SongId) -> Result<()> {
        // Association rows first so the store never holds dangling references.
        self.client
            .delete("playlist_songs", &[("song_id", Self::eq(id))])
            .await
            .map_err(GlassError::from)?;
        self.client
            .delete("likes", &[("song_id", Self::eq(id))])
            .await
            .map_err(GlassError::from)?;
        self.client
            .delete("songs", &[("id", Self::eq(id))])
            .await
            .map_err(GlassError::from)
    }

    // Playlists

    async fn get_playlists(&self) -> Result<Vec<Playlist>> {
        let playlist_rows: Vec<PlaylistRow> = self
            .client
            .select(
                "playlists",
                &[
                    ("user_id", Self::eq(&self.user_id)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await
            .map_err(GlassError::from)?;

        let songs = self.songs_by_id().await?;

        let mut playlists = Vec::with_capacity(playlist_rows.len());
        for row in playlist_rows {
            let members: Vec<PlaylistSongRow> = self
                .client
                .select(
                    "playlist_songs",
                    &[
                        ("playlist_id", Self::eq(&row.id)),
                        ("order", "position.asc".to_string()),
                    ],
                )
                .await
                .map_err(GlassError::from)?;

            let mut resolved = Vec::with_capacity(members.len());
            for member in members {
                match songs.get(&member.song_id) {
                    Some(song) => resolved.push(song.clone()),
                    None => {
                        warn!(song_id = %member.song_id, "playlist references unknown song");
                    }
                }
            }
            playlists.push(row.into_playlist(resolved));
        }
        Ok(playlists)
    }

    async fn create_playlist(&self, name: &str) -> Result<Playlist> {
        let mut rows: Vec<PlaylistRow> = self
            .client
            .insert(
                "playlists",
                &json!({ "name": name, "user_id": self.user_id.as_str() }),
            )
            .await
            .map_err(GlassError::from)?;

        match rows.pop() {
            Some(row) => Ok(row.into_playlist(Vec::new())),
            None => Err(GlassError::store("insert returned no playlist row")),
        }
    }

    async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<()> {
        self.client
            .update("playlists", &[("id", Self::eq(id))], &json!({ "name": name }))
            .await
            .map_err(GlassError::from)
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        self.client
            .delete("playlist_songs", &[("playlist_id", Self::eq(id))])
            .await
            .map_err(GlassError::from)?;
        self.client
            .delete("playlists", &[("id", Self::eq(id))])
            .await
            .map_err(GlassError::from)
    }

    async fn add_song_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        position: u32,
    ) -> Result<()> {
        let payload = PlaylistSongRow {
            playlist_id: playlist_id.to_string(),
            song_id: song_id.to_string(),
            position,
        };
        let _rows: Vec<PlaylistSongRow> = self
            .client
            .insert("playlist_songs", &payload)
            .await
            .map_err(GlassError::from)?;
        Ok(())
    }

    async fn max_playlist_position(&self, playlist_id: &PlaylistId) -> Result<Option<u32>> {
        let rows: Vec<PositionRow> = self
            .client
            .select(
                "playlist_songs",
                &[
                    ("playlist_id", Self::eq(playlist_id)),
                    ("select", "position".to_string()),
                    ("order", "position.desc".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await
            .map_err(GlassError::from)?;
        Ok(rows.first().map(|row| row.position))
    }

    // Likes

    async fn get_likes(&self) -> Result<Vec<LikedSong>> {
        let rows: Vec<LikeRow> = self
            .client
            .select(
                "likes",
                &[
                    ("user_id", Self::eq(&self.user_id)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await
            .map_err(GlassError::from)?;

        let songs = self.songs_by_id().await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let song = songs.get(&row.song_id).cloned();
                if song.is_none() {
                    warn!(song_id = %row.song_id, "like references unknown song");
                }
                song.map(|song| LikedSong {
                    song,
                    liked_at: row.created_at,
                })
            })
            .collect())
    }

    async fn insert_like(&self, song_id: &SongId) -> Result<()> {
        let _rows: Vec<LikeRow> = self
            .client
            .insert(
                "likes",
                &json!({ "user_id": self.user_id.as_str(), "song_id": song_id.as_str() }),
            )
            .await
            .map_err(GlassError::from)?;
        Ok(())
    }

    async fn delete_like(&self, song_id: &SongId) -> Result<()> {
        self.client
            .delete(
                "likes",
                &[
                    ("user_id", Self::eq(&self.user_id)),
                    ("song_id", Self::eq(song_id)),
                ],
            )
            .await
            .map_err(GlassError::from)
    }

    // Play history

    async fn record_play(&self, song_id: &SongId) -> Result<()> {
        let _rows: Vec<PlayRow> = self
            .client
            .insert(
                "play_history",
                &json!({ "user_id": self.user_id.as_str(), "song_id": song_id.as_str() }),
            )
            .await
            .map_err(GlassError::from)?;
        Ok(())
    }

    async fn get_recent_plays(&self, limit: u32) -> Result<Vec<PlayRecord>> {
        let rows: Vec<PlayRow> = self
            .client
            .select(
                "play_history",
                &[
                    ("user_id", Self::eq(&self.user_id)),
                    ("order", "played_at.desc".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await
            .map_err(GlassError::from)?;

        let songs = self.songs_by_id().await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                songs.get(&row.song_id).cloned().map(|song| PlayRecord {
                    song,
                    played_at: row.played_at,
                })
            })
            .collect())
    }

    // Profile

    async fn get_profile(&self) -> Result<Option<Profile>> {
        let rows: Vec<ProfileRow> = self
            .client
            .select("profiles", &[("user_id", Self::eq(&self.user_id))])
            .await
            .map_err(GlassError::from)?;

        Ok(rows.into_iter().next().map(|row| Profile {
            user_id: UserId::new(row.user_id),
            display_name: row.display_name,
            avatar_url: row.avatar_url,
        }))
    }

    async fn update_profile(&self, update: UpdateProfile) -> Result<()> {
        self.client
            .update("profiles", &[("user_id", Self::eq(&self.user_id))], &update)
            .await
            .map_err(GlassError::from)
    }

    async fn upload_avatar(&self, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let extension = match content_type {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        };
        let path = format!("{}/avatar.{extension}", self.user_id);
        self.client
            .upload_object("avatars", &path, bytes, content_type)
            .await
            .map_err(GlassError::from)
    }
}
