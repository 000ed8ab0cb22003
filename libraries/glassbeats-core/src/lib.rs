//! GlassBeats Core
//!
//! Domain types, traits, and error handling shared across the GlassBeats
//! crates.
//!
//! This crate defines:
//! - **Domain Types**: `Song`, `Playlist`, `LikedSong`, `PlayRecord`,
//!   `Profile`, and their ID newtypes
//! - **Store Trait**: `MusicStore`, the seam between the in-memory player
//!   and the hosted relational store
//! - **Notices**: the single transient-notification value type every layer
//!   speaks (`Notice` with Info/Success/Error severity)
//! - **Error Handling**: unified `GlassError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use glassbeats_core::types::{Song, VideoId};
//!
//! let video_id = VideoId::parse("dQw4w9WgXcQ").unwrap();
//! let song = Song::from_video(video_id, "Never Gonna Give You Up", "Rick Astley");
//! assert_eq!(song.video_id.as_str(), "dQw4w9WgXcQ");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{GlassError, Result};
pub use storage::MusicStore;
pub use traits::MetadataProvider;
pub use types::{
    LikedSong, NewSong, Notice, PlayRecord, Playlist, PlaylistEntry, PlaylistId, Profile,
    Severity, Song, SongId, UpdateProfile, UserId, VideoId, VideoMetadata,
};
