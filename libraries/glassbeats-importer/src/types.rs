//! Result types returned by the importer clients.

use glassbeats_core::types::{Song, VideoId};

/// One search hit from the video platform.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// External video identifier
    pub video_id: VideoId,

    /// Video title
    pub title: String,

    /// Thumbnail URL
    pub thumbnail: String,

    /// Uploading channel
    pub channel_title: String,
}

impl SearchResult {
    /// Turn this hit into a transient song, with the channel standing in
    /// for the artist.
    pub fn into_song(self) -> Song {
        let mut song = Song::from_video(self.video_id, self.title, self.channel_title);
        if !self.thumbnail.is_empty() {
            song.thumbnail = self.thumbnail;
        }
        song
    }
}

/// A fully drained external playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistImport {
    /// Playlist title as reported by the platform
    pub title: String,

    /// Playable items in playlist order
    pub items: Vec<SearchResult>,
}

/// One catalog track resolved to a playable video.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTrack {
    /// Track title from the catalog
    pub title: String,

    /// Artist names, joined
    pub artist: String,

    /// Album artwork from the catalog
    pub thumbnail: String,

    /// Track duration in seconds
    pub duration_seconds: Option<u32>,

    /// The matched playable video
    pub video_id: VideoId,
}

impl CatalogTrack {
    /// Turn this track into a transient song carrying the catalog's richer
    /// metadata.
    pub fn into_song(self) -> Song {
        let mut song = Song::from_video(self.video_id, self.title, self.artist);
        if !self.thumbnail.is_empty() {
            song.thumbnail = self.thumbnail;
        }
        song.duration_seconds = self.duration_seconds;
        song
    }
}

/// Outcome of a catalog import.
///
/// Tracks with no resolvable video match are dropped; the counts record
/// how lossy the resolution was.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogImport {
    /// Tracks that resolved to a playable video
    pub tracks: Vec<CatalogTrack>,

    /// Tracks the catalog reported
    pub total: usize,

    /// Tracks that found a video match
    pub matched: usize,
}
