//! Playback manager - core orchestration
//!
//! Owns the queue, the playback session flags, and the sleep timer. All
//! mutations of queue/index/flags go through this type; the bridge and the
//! media-session surface call back into the same entry points the UI uses,
//! so there is exactly one playback authority.
//!
//! Operations are synchronous, in-memory, and do not fail; indexes are
//! defensively clamped rather than corrupting state. Events are buffered
//! and drained by the driver after each batch of calls.

use crate::{
    events::PlayerEvent,
    queue::PlayQueue,
    sleep::{SleepRequest, SleepTick, SleepTimer},
    types::{PlayerConfig, RepeatMode},
};
use glassbeats_core::types::{Notice, Song};

/// Central playback state owner
///
/// Explicitly constructed and injected into whichever layer needs it;
/// nothing reaches in and mutates queue or flags directly.
#[derive(Debug)]
pub struct PlaybackManager {
    // Queue and pointer
    queue: PlayQueue,

    // Session state
    is_playing: bool,
    volume: u8,
    repeat: RepeatMode,

    // Sleep timer
    sleep: SleepTimer,

    // Event buffer for driver/UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl Default for PlaybackManager {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl PlaybackManager {
    /// Create a new playback manager
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            queue: PlayQueue::new(),
            is_playing: false,
            volume: config.volume.min(100),
            repeat: config.repeat,
            sleep: SleepTimer::new(),
            pending_events: Vec::new(),
        }
    }

    // ===== Queue Management =====

    /// Append a song to the end of the queue.
    ///
    /// The current index is unchanged; repeated calls append duplicates,
    /// which is allowed. Persisting the song is the adapter's business and
    /// happens outside this call.
    pub fn add_to_queue(&mut self, song: Song) {
        let detail = format!("{} by {}", song.title, song.artist);
        self.queue.push(song);
        self.emit_queue_changed();
        self.emit(PlayerEvent::Notice(Notice::success("Added to queue", detail)));
    }

    /// Remove the song at `index` from the queue.
    ///
    /// When the removed slot was the playing one, whatever now occupies it
    /// becomes current and a track change fires so the bridge reloads.
    /// Removing the last remaining song stops playback.
    pub fn remove_from_queue(&mut self, index: usize) {
        let before = self.track_marker();
        if self.queue.remove(index).is_none() {
            return;
        }
        self.emit_queue_changed();
        self.emit_track_changed_since(before);

        if self.queue.is_empty() {
            self.set_playing(false);
        }
    }

    /// Move the song at `old_index` to `new_index` (array-move semantics).
    ///
    /// The current-song identity is preserved by pointer adjustment.
    pub fn reorder_queue(&mut self, old_index: usize, new_index: usize) {
        self.queue.move_song(old_index, new_index);
        self.emit_queue_changed();
    }

    /// Replace the whole queue (playlist load, play-all, play-liked) and
    /// start playing from the first song.
    pub fn load_collection(&mut self, songs: Vec<Song>) {
        let before = self.track_marker();
        self.queue.replace(songs);
        self.emit_queue_changed();
        self.emit_track_changed_since(before);
        self.set_playing(!self.queue.is_empty());
    }

    /// Jump to the song at `index` (clamped) and start playing.
    pub fn play_at(&mut self, index: usize) {
        let before = self.track_marker();
        self.queue.set_current_index(index);
        self.emit_track_changed_since(before);
        self.set_playing(!self.queue.is_empty());
    }

    // ===== Transport =====

    /// Advance to the next track.
    ///
    /// Repeat-one restarts the current track from zero instead of moving.
    /// At the end of the queue, repeat-all wraps to the first song; with
    /// repeat off, playback stops and the index stays put so replay and
    /// "previous" still work.
    pub fn play_next(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        if self.repeat == RepeatMode::One {
            self.emit(PlayerEvent::RestartCurrent);
            return;
        }

        let before = self.track_marker();
        if self.queue.advance() {
            self.emit_track_changed_since(before);
        } else if self.repeat == RepeatMode::All {
            self.queue.wrap_to_start();
            self.emit_track_changed_since(before);
        } else {
            self.set_playing(false);
        }
    }

    /// Step back to the previous track. No wraparound; a no-op at the
    /// start of the queue.
    pub fn play_previous(&mut self) {
        let before = self.track_marker();
        if self.queue.retreat() {
            self.emit_track_changed_since(before);
        }
    }

    /// The widget finished the current track.
    ///
    /// An armed end-of-track sleep timer stops playback here instead of
    /// advancing; otherwise this is a normal advance.
    pub fn handle_track_ended(&mut self) {
        if self.sleep.take_end_of_track() {
            self.set_playing(false);
            self.emit(PlayerEvent::SleepExpired);
            self.emit(PlayerEvent::Notice(Notice::info(
                "Sleep timer",
                "Playback stopped at the end of the song",
            )));
            return;
        }
        self.play_next();
    }

    /// Set the playing flag.
    pub fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.emit(PlayerEvent::StateChanged {
                is_playing: playing,
            });
        }
    }

    /// Toggle between playing and paused.
    pub fn toggle_play(&mut self) {
        self.set_playing(!self.is_playing);
    }

    /// Set volume (0-100, clamped)
    pub fn set_volume(&mut self, level: u8) {
        let level = level.min(100);
        if self.volume != level {
            self.volume = level;
            self.emit(PlayerEvent::VolumeChanged { level });
        }
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle.
    ///
    /// Turning on snapshots the order, keeps the current song first and
    /// shuffles the rest; turning off restores the snapshot and relocates
    /// the current song in it by identity.
    pub fn toggle_shuffle(&mut self) {
        if self.queue.is_shuffled() {
            self.queue.disable_shuffle();
        } else {
            self.queue.enable_shuffle();
        }
        self.emit_queue_changed();
    }

    /// Cycle the repeat mode: off -> all -> one -> off
    pub fn toggle_repeat(&mut self) {
        self.repeat = self.repeat.cycled();
    }

    // ===== Sleep Timer =====

    /// Start (or replace) the sleep timer.
    pub fn set_sleep_timer(&mut self, request: SleepRequest) {
        self.sleep.set(request);
        let detail = match request {
            SleepRequest::Minutes(minutes) => {
                format!("Music will stop in {minutes} minutes")
            }
            SleepRequest::EndOfTrack => "Music will stop after the current song".to_string(),
        };
        self.emit(PlayerEvent::Notice(Notice::info("Sleep timer set", detail)));
    }

    /// Cancel any running sleep timer.
    pub fn cancel_sleep_timer(&mut self) {
        if self.sleep.cancel() {
            self.emit(PlayerEvent::Notice(Notice::info(
                "Sleep timer cancelled",
                "Music will keep playing",
            )));
        }
    }

    /// Advance timers by one second. Driven by the bridge's 1 Hz tick.
    pub fn tick_second(&mut self) {
        if let SleepTick::Expired = self.sleep.tick() {
            self.set_playing(false);
            self.emit(PlayerEvent::SleepExpired);
            self.emit(PlayerEvent::Notice(Notice::info(
                "Sleep timer",
                "Playback paused",
            )));
        }
    }

    // ===== State Queries =====

    /// The song at the current queue position
    pub fn current_song(&self) -> Option<&Song> {
        self.queue.current_song()
    }

    /// Songs in play order
    pub fn queue(&self) -> &[Song] {
        self.queue.songs()
    }

    /// Current position in the queue
    pub fn current_index(&self) -> usize {
        self.queue.current_index()
    }

    /// Number of songs in the queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current volume (0-100)
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Whether shuffle is active
    pub fn is_shuffled(&self) -> bool {
        self.queue.is_shuffled()
    }

    /// Seconds left on the sleep countdown, when one is running
    pub fn sleep_remaining_seconds(&self) -> Option<u32> {
        self.sleep.remaining_seconds()
    }

    /// Whether any sleep timer (countdown or end-of-track) is active
    pub fn sleep_timer_active(&self) -> bool {
        self.sleep.is_active()
    }

    // ===== Events =====

    /// Take all buffered events.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn emit_queue_changed(&mut self) {
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Pointer position + current song before a mutation, for change
    /// detection afterwards.
    fn track_marker(&self) -> (usize, Option<Song>) {
        (self.queue.current_index(), self.queue.current_song().cloned())
    }

    fn emit_track_changed_since(&mut self, before: (usize, Option<Song>)) {
        let (old_index, previous) = before;
        let song = self.queue.current_song().cloned();
        let moved = old_index != self.queue.current_index();
        let identity_changed = match (&previous, &song) {
            (Some(a), Some(b)) => a.id != b.id,
            (None, None) => false,
            _ => true,
        };
        if moved || identity_changed {
            self.emit(PlayerEvent::TrackChanged { song, previous });
        }
    }
}
