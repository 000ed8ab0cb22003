//! Domain types for GlassBeats

mod ids;
mod notice;
mod playlist;
mod profile;
mod song;

pub use ids::{PlaylistId, SongId, UserId, VideoId};
pub use notice::{Notice, Severity};
pub use playlist::{Playlist, PlaylistEntry};
pub use profile::{Profile, UpdateProfile};
pub use song::{LikedSong, NewSong, PlayRecord, Song, VideoMetadata};
