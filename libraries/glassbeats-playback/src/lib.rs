//! GlassBeats - Playback Management
//!
//! Queue engine and playback bridge for GlassBeats.
//!
//! This crate provides:
//! - Ordered play queue with current-index tracking
//! - Shuffle with exact order restore (snapshot-based)
//! - Repeat modes (Off, All, One)
//! - Sleep timer (countdown or end-of-track)
//! - Bridge to an external embedded media widget (ready/playing/paused/ended)
//! - OS media controls mirror (MPRIS/SMTC/Now Playing)
//!
//! # Architecture
//!
//! The crate is platform-agnostic: the embedded widget and the background
//! keep-alive channel enter through traits, and the manager is an explicitly
//! constructed state owner injected into whichever layer needs it. Nothing
//! here touches the network or a database; persistence is the storage
//! crate's business.
//!
//! # Example: Queue and Transport
//!
//! ```rust
//! use glassbeats_playback::{PlaybackManager, PlayerConfig};
//! use glassbeats_core::types::{Song, VideoId};
//!
//! let mut manager = PlaybackManager::new(PlayerConfig::default());
//!
//! let video_id = VideoId::parse("dQw4w9WgXcQ").unwrap();
//! manager.add_to_queue(Song::from_video(video_id, "My Song", "Artist"));
//! manager.play_at(0);
//!
//! assert!(manager.is_playing());
//! assert_eq!(manager.current_index(), 0);
//!
//! manager.toggle_shuffle();
//! manager.toggle_repeat();
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use glassbeats_playback::{
//!     MediaWidget, NoopKeepAlive, PlaybackManager, PlayerBridge, Result, WidgetEvent,
//! };
//! use glassbeats_core::types::VideoId;
//!
//! // Implement MediaWidget for your embedded player
//! struct MyEmbed;
//!
//! impl MediaWidget for MyEmbed {
//!     fn load(&mut self, _video_id: &VideoId) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn seek(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//!     fn current_time(&self) -> Result<f64> { Ok(0.0) }
//!     fn duration(&self) -> Result<f64> { Ok(0.0) }
//! }
//!
//! let mut manager = PlaybackManager::default();
//! let mut bridge = PlayerBridge::new(Box::new(MyEmbed), Box::new(NoopKeepAlive));
//!
//! // Platform callbacks feed typed events into the bridge...
//! bridge.push_event(WidgetEvent::Ready { duration_seconds: 212.0 });
//!
//! // ...and the driver syncs after every batch of manager calls,
//! // plus once per second via bridge.tick(&mut manager).
//! let events = bridge.sync(&mut manager);
//! ```

mod bridge;
mod error;
mod events;
mod manager;
mod media_session;
mod queue;
mod shuffle;
mod sleep;
pub mod types;

// Public exports
pub use bridge::{KeepAliveChannel, MediaWidget, NoopKeepAlive, PlayerBridge, WidgetEvent};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use manager::PlaybackManager;
pub use media_session::{MediaSession, TransportCommand};
pub use queue::PlayQueue;
pub use sleep::{SleepRequest, SleepTick, SleepTimer};
pub use types::{PlayerConfig, RepeatMode};
