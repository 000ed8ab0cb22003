//! GlassBeats Storage
//!
//! Persistence adapter over the hosted relational store.
//!
//! This crate translates player actions (add song, like, playlist edits,
//! play history) into calls against the store's generic REST surface and
//! hydrates the read-side collections the UI renders from.
//!
//! # Architecture
//!
//! - **`StoreClient`**: low-level HTTP client (per-table query/insert/
//!   update/delete, object-storage upload), scoped to an authenticated
//!   identity
//! - **`RestMusicStore`**: the `MusicStore` trait implementation mapping
//!   wire rows to domain types
//! - **`LibraryAdapter`**: domain rules (de-dup by video id, read-before-
//!   write like toggle, append-only playlist positions, bulk metadata
//!   refresh) plus a keyed cache with targeted invalidation
//!
//! # Example
//!
//! ```rust,no_run
//! use glassbeats_storage::{LibraryAdapter, RestMusicStore, StoreClient, StoreConfig};
//! use glassbeats_core::types::UserId;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = StoreClient::new(StoreConfig::new(
//!     "https://store.example.com",
//!     "anon-key",
//!     "user-access-token",
//! ))?;
//! let store = RestMusicStore::new(client, UserId::new("user-1"));
//! let mut library = LibraryAdapter::new(Arc::new(store));
//!
//! let songs = library.all_songs().await?;
//! println!("{} songs", songs.len());
//! # Ok(())
//! # }
//! ```

mod adapter;
mod client;
mod error;
mod rows;
mod store;

// Re-export main types
pub use adapter::{Collection, LibraryAdapter, RefreshSummary};
pub use client::{StoreClient, StoreConfig};
pub use error::{Result, StoreError};
pub use store::RestMusicStore;
