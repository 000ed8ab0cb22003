//! OS media-session surface (MPRIS/SMTC/Now Playing)
//!
//! Mirrors now-playing metadata to the platform's media controls via
//! `souvlaki` and feeds hardware/overlay transport events back to the
//! bridge, which routes them through the same manager entry points the
//! in-app controls use.

use glassbeats_core::types::{Song, VideoId};
use souvlaki::{
    MediaControlEvent, MediaControls, MediaMetadata, MediaPlayback, MediaPosition, PlatformConfig,
};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;
use tracing::warn;

/// Transport actions arriving from the OS surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    /// Resume playback
    Play,

    /// Pause playback
    Pause,

    /// Toggle play/pause
    Toggle,

    /// Skip to the next track
    Next,

    /// Go back to the previous track
    Previous,
}

fn map_control_event(event: MediaControlEvent) -> Option<TransportCommand> {
    match event {
        MediaControlEvent::Play => Some(TransportCommand::Play),
        MediaControlEvent::Pause => Some(TransportCommand::Pause),
        MediaControlEvent::Toggle => Some(TransportCommand::Toggle),
        MediaControlEvent::Next => Some(TransportCommand::Next),
        MediaControlEvent::Previous => Some(TransportCommand::Previous),
        // Seek, volume, raise and quit have no counterpart in the player.
        _ => None,
    }
}

/// Handle to the platform media controls.
///
/// Publishing is deduplicated: metadata is re-sent only when the song
/// identity changes, playback state only when it flips.
pub struct MediaSession {
    controls: MediaControls,
    commands: Receiver<TransportCommand>,
    last_metadata: Option<VideoId>,
    last_playing: Option<bool>,
}

impl MediaSession {
    /// Create and attach platform media controls.
    ///
    /// Returns `None` when the platform backend is unavailable; the player
    /// keeps working without an OS surface.
    pub fn new(display_name: &str, dbus_name: &str) -> Option<Self> {
        let mut controls = match MediaControls::new(PlatformConfig {
            display_name,
            dbus_name,
            hwnd: None,
        }) {
            Ok(controls) => controls,
            Err(err) => {
                warn!(?err, "failed to create media controls backend");
                return None;
            }
        };

        let (sender, receiver): (Sender<TransportCommand>, Receiver<TransportCommand>) = channel();
        if let Err(err) = controls.attach(move |event| {
            if let Some(command) = map_control_event(event) {
                let _ = sender.send(command);
            }
        }) {
            warn!(?err, "failed to attach media controls handler");
            return None;
        }

        Some(Self {
            controls,
            commands: receiver,
            last_metadata: None,
            last_playing: None,
        })
    }

    /// Drain transport commands received since the last poll.
    pub fn poll_commands(&mut self) -> Vec<TransportCommand> {
        self.commands.try_iter().collect()
    }

    /// Publish now-playing metadata for `song`.
    pub fn publish_metadata(&mut self, song: &Song, duration_seconds: f64) {
        if self.last_metadata.as_ref() == Some(&song.video_id) {
            return;
        }

        let duration = (duration_seconds > 0.0).then(|| Duration::from_secs_f64(duration_seconds));
        if let Err(err) = self.controls.set_metadata(MediaMetadata {
            title: Some(&song.title),
            artist: Some(&song.artist),
            album: None,
            cover_url: Some(&song.thumbnail),
            duration,
        }) {
            warn!(?err, "failed to publish media metadata");
            return;
        }
        self.last_metadata = Some(song.video_id.clone());
    }

    /// Publish the play/pause state with the current position.
    pub fn publish_playback(&mut self, is_playing: bool, position_seconds: f64) {
        if self.last_playing == Some(is_playing) {
            return;
        }

        let progress = Some(MediaPosition(Duration::from_secs_f64(
            position_seconds.max(0.0),
        )));
        let playback = if is_playing {
            MediaPlayback::Playing { progress }
        } else {
            MediaPlayback::Paused { progress }
        };
        if let Err(err) = self.controls.set_playback(playback) {
            warn!(?err, "failed to publish playback state");
            return;
        }
        self.last_playing = Some(is_playing);
    }
}
