//! Player events
//!
//! Event-based communication for driver/UI synchronization. The manager
//! buffers events as operations run; the driver drains them after each
//! batch of calls.

use glassbeats_core::types::{Notice, Song};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// The current track changed (by index move, removal, or queue replace)
    TrackChanged {
        /// The new current song, `None` when the queue emptied
        song: Option<Song>,
        /// The previously current song, if any
        previous: Option<Song>,
    },

    /// Playback flag changed (playing/paused)
    StateChanged {
        /// The new playing flag
        is_playing: bool,
    },

    /// Queue contents changed (add/remove/reorder/replace/shuffle)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Restart the current track from time zero (repeat-one advance)
    RestartCurrent,

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },

    /// The sleep timer reached zero and playback was paused
    SleepExpired,

    /// A transient notification for the user
    Notice(Notice),
}
