//! GlassBeats Importer
//!
//! Clients for the external metadata, search, and import services.
//!
//! This crate handles everything that turns a user-pasted link or query
//! into playable songs:
//!
//! - Video URL parsing (long-form, short-form, embed, shorts, bare id)
//! - Canonical metadata lookup with placeholder fallback
//! - Free-text search on the video platform
//! - Whole-playlist import (pagination drained by the proxy)
//! - Catalog import (track/album/playlist links resolved to playable videos)
//!
//! All network traffic goes through serverless proxy functions hosted next
//! to the store; this crate never talks to the external platforms directly
//! and never holds their API credentials.
//!
//! # Example
//!
//! ```rust,no_run
//! use glassbeats_importer::{ImporterClient, ProxyConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ImporterClient::new(ProxyConfig::new(
//!     "https://store.example.com",
//!     "anon-key",
//!     "user-access-token",
//! ))?;
//!
//! let song = client
//!     .song_from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!     .await?;
//! println!("{} by {}", song.title, song.artist);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod parse;
mod types;

// Re-export main types
pub use client::{ImporterClient, ProxyConfig};
pub use error::{ImportError, Result};
pub use parse::{extract_playlist_id, extract_video_id, parse_catalog_ref, CatalogKind, CatalogRef};
pub use types::{CatalogImport, CatalogTrack, PlaylistImport, SearchResult};
