//! Playback bridge
//!
//! One-directional adaptation from manager state to an external, embedded
//! media widget, and event translation in the reverse direction. The host
//! platform implements `MediaWidget` and pushes `WidgetEvent`s into the
//! bridge's queue; the bridge drains them on `sync`/`tick`.
//!
//! The bridge is the only owner of the widget handle. Commands that the
//! widget rejects are logged and dropped; the bridge does nothing on that
//! tick rather than crashing the session.

use crate::error::Result;
use crate::events::PlayerEvent;
use crate::manager::PlaybackManager;
use crate::media_session::{MediaSession, TransportCommand};
use glassbeats_core::types::VideoId;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Commands the embedded media widget must support.
///
/// Implemented by the host platform; all calls are fallible because the
/// widget lives outside our control and may be in an invalid state.
pub trait MediaWidget {
    /// Load the video with the given identifier
    fn load(&mut self, video_id: &VideoId) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Seek to a position in seconds
    fn seek(&mut self, seconds: f64) -> Result<()>;

    /// Current playback position in seconds
    fn current_time(&self) -> Result<f64>;

    /// Duration of the loaded video in seconds
    fn duration(&self) -> Result<f64>;
}

/// Asynchronous signals the widget emits.
///
/// These are the only widget states the bridge recognizes; anything else
/// the platform observes is simply not forwarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    /// The widget finished initializing and reported its duration
    Ready {
        /// Duration of the loaded video in seconds
        duration_seconds: f64,
    },

    /// Playback started
    Playing,

    /// Playback paused
    Paused,

    /// The current video finished
    Ended,
}

/// Inaudible channel that keeps the host invoking playback callbacks while
/// the page is unfocused.
///
/// Failures here must never take the bridge down; they are logged and
/// ignored.
pub trait KeepAliveChannel {
    /// Start the silent channel
    fn start(&mut self) -> Result<()>;

    /// Stop the silent channel and release its resources
    fn stop(&mut self) -> Result<()>;
}

/// Keep-alive for platforms where the host runtime needs no help.
#[derive(Debug, Default)]
pub struct NoopKeepAlive;

impl KeepAliveChannel for NoopKeepAlive {
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Widget readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BridgeState {
    /// The widget has not reported ready yet; no commands are issued
    Uninitialized,

    /// The widget accepted its handle and can be commanded
    Ready,
}

/// Adapter between the playback manager and the embedded widget.
pub struct PlayerBridge {
    widget: Box<dyn MediaWidget>,
    keep_alive: Box<dyn KeepAliveChannel>,
    media_session: Option<MediaSession>,

    state: BridgeState,
    widget_events: VecDeque<WidgetEvent>,

    /// Identifier of the last video loaded into the widget; guards against
    /// redundant reload loops when unrelated state changes re-run `sync`.
    last_loaded: Option<VideoId>,

    /// Last play/pause state commanded to (or reported by) the widget
    commanded_playing: bool,

    current_time: f64,
    duration: f64,
}

impl PlayerBridge {
    /// Create a bridge around a platform widget.
    ///
    /// The keep-alive channel starts immediately and lives for the bridge's
    /// lifetime.
    pub fn new(widget: Box<dyn MediaWidget>, mut keep_alive: Box<dyn KeepAliveChannel>) -> Self {
        if let Err(err) = keep_alive.start() {
            warn!(error = %err, "keep-alive channel failed to start");
        }
        Self {
            widget,
            keep_alive,
            media_session: None,
            state: BridgeState::Uninitialized,
            widget_events: VecDeque::new(),
            last_loaded: None,
            commanded_playing: false,
            current_time: 0.0,
            duration: 0.0,
        }
    }

    /// Attach an OS media-session surface.
    pub fn with_media_session(mut self, session: MediaSession) -> Self {
        self.media_session = Some(session);
        self
    }

    /// Queue a widget event for the next `sync`.
    ///
    /// Called by the platform from its widget callbacks.
    pub fn push_event(&mut self, event: WidgetEvent) {
        self.widget_events.push_back(event);
    }

    /// Last polled playback position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Last known duration of the loaded video in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Reconcile manager state with the widget and drain manager events.
    ///
    /// Call after every batch of manager mutations. Returns the drained
    /// events for the UI.
    pub fn sync(&mut self, manager: &mut PlaybackManager) -> Vec<PlayerEvent> {
        self.apply_transport_commands(manager);

        let mut ended = false;
        while let Some(event) = self.widget_events.pop_front() {
            match event {
                WidgetEvent::Ready { duration_seconds } => {
                    debug!(duration_seconds, "widget ready");
                    self.state = BridgeState::Ready;
                    self.duration = duration_seconds;
                }
                WidgetEvent::Playing => {
                    manager.set_playing(true);
                    self.commanded_playing = true;
                }
                WidgetEvent::Paused => {
                    manager.set_playing(false);
                    self.commanded_playing = false;
                }
                WidgetEvent::Ended => {
                    ended = true;
                    manager.handle_track_ended();
                }
            }
        }

        let loaded = self.reconcile(manager);

        let events = manager.drain_events();
        let mut restarted = false;
        for event in &events {
            if matches!(event, PlayerEvent::RestartCurrent) {
                self.restart(manager.is_playing());
                restarted = true;
            }
        }

        // Advancing across tracks that share a video identifier (repeat-all
        // wrap on a short queue, adjacent duplicates) keeps the loaded id,
        // so an ended widget must be restarted rather than reloaded.
        if ended && !loaded && !restarted && manager.is_playing() && self.state == BridgeState::Ready
        {
            self.restart(true);
        }

        self.publish_media_session(manager);
        events
    }

    /// One-second tick: timers and progress polling, then a normal `sync`.
    ///
    /// Position is polled, not pushed, because the widget offers no
    /// time-update event.
    pub fn tick(&mut self, manager: &mut PlaybackManager) -> Vec<PlayerEvent> {
        manager.tick_second();

        if manager.is_playing() && self.state == BridgeState::Ready {
            match self.widget.current_time() {
                Ok(seconds) => self.current_time = seconds,
                Err(err) => warn!(error = %err, "widget position poll failed"),
            }
            if let Ok(seconds) = self.widget.duration() {
                self.duration = seconds;
            }
        }

        self.sync(manager)
    }

    /// Drive the widget toward the manager's current song and play flag.
    ///
    /// Returns true when a load command was issued this pass.
    fn reconcile(&mut self, manager: &mut PlaybackManager) -> bool {
        if self.state != BridgeState::Ready {
            // Never command the widget before it is ready; the load request
            // is re-derived from manager state once the ready event lands.
            return false;
        }

        let desired = manager.current_song().map(|s| s.video_id.clone());
        let mut loaded = false;

        if desired != self.last_loaded {
            match &desired {
                Some(id) => {
                    let id = id.clone();
                    if self.try_widget("load", |w| w.load(&id)) {
                        self.last_loaded = Some(id);
                        self.current_time = 0.0;
                        loaded = true;
                        if manager.is_playing() {
                            self.try_widget("play", |w| w.play());
                            self.commanded_playing = true;
                        }
                    }
                }
                None => {
                    // Queue emptied under us; silence the widget.
                    if self.commanded_playing {
                        self.try_widget("pause", |w| w.pause());
                        self.commanded_playing = false;
                    }
                    self.last_loaded = None;
                }
            }
        }

        if self.last_loaded.is_some() && manager.is_playing() != self.commanded_playing {
            if manager.is_playing() {
                self.try_widget("play", |w| w.play());
            } else {
                self.try_widget("pause", |w| w.pause());
            }
            self.commanded_playing = manager.is_playing();
        }

        loaded
    }

    /// Restart the loaded video from time zero.
    fn restart(&mut self, resume: bool) {
        if self.state != BridgeState::Ready {
            return;
        }
        self.try_widget("seek", |w| w.seek(0.0));
        self.current_time = 0.0;
        if resume {
            self.try_widget("play", |w| w.play());
            self.commanded_playing = true;
        }
    }

    fn apply_transport_commands(&mut self, manager: &mut PlaybackManager) {
        let Some(session) = &mut self.media_session else {
            return;
        };
        for command in session.poll_commands() {
            match command {
                TransportCommand::Play => manager.set_playing(true),
                TransportCommand::Pause => manager.set_playing(false),
                TransportCommand::Toggle => manager.toggle_play(),
                TransportCommand::Next => manager.play_next(),
                TransportCommand::Previous => manager.play_previous(),
            }
        }
    }

    fn publish_media_session(&mut self, manager: &PlaybackManager) {
        let Some(session) = &mut self.media_session else {
            return;
        };
        if let Some(song) = manager.current_song() {
            session.publish_metadata(song, self.duration);
        }
        session.publish_playback(manager.is_playing(), self.current_time);
    }

    /// Run one widget command, swallowing and logging any error.
    fn try_widget<T>(
        &mut self,
        command: &'static str,
        f: impl FnOnce(&mut dyn MediaWidget) -> Result<T>,
    ) -> bool {
        match f(self.widget.as_mut()) {
            Ok(_) => true,
            Err(err) => {
                warn!(command, error = %err, "widget command failed");
                false
            }
        }
    }
}

impl Drop for PlayerBridge {
    fn drop(&mut self) {
        // Release the keep-alive resource on every exit path; a failing
        // audio subsystem must not turn teardown into a crash.
        if let Err(err) = self.keep_alive.stop() {
            warn!(error = %err, "keep-alive channel failed to stop");
        }
    }
}
