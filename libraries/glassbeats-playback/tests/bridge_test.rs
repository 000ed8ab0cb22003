//! Playback bridge integration tests
//!
//! Drives the bridge with a scripted widget: readiness ordering, the
//! no-redundant-reload guard, ended handling across repeat modes and the
//! end-of-track sleep timer, progress polling, and command-failure
//! tolerance.

use glassbeats_core::types::{Song, SongId, VideoId};
use glassbeats_playback::{
    KeepAliveChannel, MediaWidget, PlaybackError, PlaybackManager, PlayerBridge, Result,
    SleepRequest, WidgetEvent,
};
use std::cell::RefCell;
use std::rc::Rc;

// ===== Test Helpers =====

#[derive(Debug, Default)]
struct WidgetState {
    commands: Vec<String>,
    current_time: f64,
    duration: f64,
    fail_commands: bool,
}

#[derive(Clone, Default)]
struct FakeWidget(Rc<RefCell<WidgetState>>);

impl FakeWidget {
    fn commands(&self) -> Vec<String> {
        self.0.borrow().commands.clone()
    }

    fn clear(&self) {
        self.0.borrow_mut().commands.clear();
    }

    fn set_time(&self, seconds: f64) {
        self.0.borrow_mut().current_time = seconds;
    }

    fn set_failing(&self, failing: bool) {
        self.0.borrow_mut().fail_commands = failing;
    }
}

impl MediaWidget for FakeWidget {
    fn load(&mut self, video_id: &VideoId) -> Result<()> {
        let mut state = self.0.borrow_mut();
        if state.fail_commands {
            return Err(PlaybackError::widget("load rejected"));
        }
        state.commands.push(format!("load:{video_id}"));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.0.borrow_mut();
        if state.fail_commands {
            return Err(PlaybackError::widget("play rejected"));
        }
        state.commands.push("play".to_string());
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut state = self.0.borrow_mut();
        if state.fail_commands {
            return Err(PlaybackError::widget("pause rejected"));
        }
        state.commands.push("pause".to_string());
        Ok(())
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        let mut state = self.0.borrow_mut();
        if state.fail_commands {
            return Err(PlaybackError::widget("seek rejected"));
        }
        state.commands.push(format!("seek:{seconds}"));
        Ok(())
    }

    fn current_time(&self) -> Result<f64> {
        Ok(self.0.borrow().current_time)
    }

    fn duration(&self) -> Result<f64> {
        Ok(self.0.borrow().duration)
    }
}

#[derive(Clone, Default)]
struct FakeKeepAlive {
    log: Rc<RefCell<Vec<&'static str>>>,
    fail: bool,
}

impl KeepAliveChannel for FakeKeepAlive {
    fn start(&mut self) -> Result<()> {
        if self.fail {
            return Err(PlaybackError::keep_alive("audio subsystem unavailable"));
        }
        self.log.borrow_mut().push("start");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if self.fail {
            return Err(PlaybackError::keep_alive("audio subsystem unavailable"));
        }
        self.log.borrow_mut().push("stop");
        Ok(())
    }
}

fn song(id: &str, video: &str) -> Song {
    Song {
        id: SongId::new(id),
        title: format!("Track {id}"),
        artist: "Test Artist".to_string(),
        video_id: VideoId::parse(video).unwrap(),
        thumbnail: String::new(),
        duration_seconds: Some(200),
        user_id: None,
        created_at: None,
    }
}

fn setup(songs: &[(&str, &str)]) -> (PlaybackManager, PlayerBridge, FakeWidget) {
    let widget = FakeWidget::default();
    let bridge = PlayerBridge::new(Box::new(widget.clone()), Box::new(FakeKeepAlive::default()));
    let mut manager = PlaybackManager::default();
    for (id, video) in songs {
        manager.add_to_queue(song(id, video));
    }
    manager.drain_events();
    (manager, bridge, widget)
}

// ===== Readiness =====

#[test]
fn test_no_commands_before_ready() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa")]);
    manager.play_at(0);

    bridge.sync(&mut manager);
    assert!(widget.commands().is_empty());
}

#[test]
fn test_pending_load_replays_once_ready() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa")]);
    manager.play_at(0);
    bridge.sync(&mut manager);

    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 212.0,
    });
    bridge.sync(&mut manager);

    assert_eq!(widget.commands(), ["load:aaaaaaaaaaa", "play"]);
    assert_eq!(bridge.duration(), 212.0);
}

#[test]
fn test_no_redundant_reload_on_repeated_sync() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa")]);
    manager.play_at(0);
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    bridge.sync(&mut manager);
    widget.clear();

    // Unrelated state churn must not trigger reloads.
    manager.set_volume(80);
    bridge.sync(&mut manager);
    bridge.sync(&mut manager);
    assert!(widget.commands().is_empty());
}

// ===== Widget Events =====

#[test]
fn test_ended_advances_and_loads_next() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa"), ("2", "bbbbbbbbbbb")]);
    manager.play_at(0);
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    bridge.sync(&mut manager);
    widget.clear();

    bridge.push_event(WidgetEvent::Ended);
    bridge.sync(&mut manager);

    assert_eq!(manager.current_index(), 1);
    assert_eq!(widget.commands(), ["load:bbbbbbbbbbb", "play"]);
}

#[test]
fn test_ended_at_queue_end_pauses_widget() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa")]);
    manager.play_at(0);
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    bridge.sync(&mut manager);
    widget.clear();

    bridge.push_event(WidgetEvent::Ended);
    bridge.sync(&mut manager);

    assert!(!manager.is_playing());
    assert_eq!(manager.current_index(), 0);
    assert_eq!(widget.commands(), ["pause"]);
}

#[test]
fn test_playing_and_paused_events_update_manager() {
    let (mut manager, mut bridge, _widget) = setup(&[("1", "aaaaaaaaaaa")]);
    manager.play_at(0);
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    bridge.sync(&mut manager);

    bridge.push_event(WidgetEvent::Paused);
    bridge.sync(&mut manager);
    assert!(!manager.is_playing());

    bridge.push_event(WidgetEvent::Playing);
    bridge.sync(&mut manager);
    assert!(manager.is_playing());
}

// ===== Repeat Handling =====

#[test]
fn test_repeat_one_restarts_from_zero() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa"), ("2", "bbbbbbbbbbb")]);
    manager.play_at(0);
    manager.toggle_repeat();
    manager.toggle_repeat(); // one
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    bridge.sync(&mut manager);
    widget.clear();

    bridge.push_event(WidgetEvent::Ended);
    bridge.sync(&mut manager);

    assert_eq!(manager.current_index(), 0);
    assert_eq!(widget.commands(), ["seek:0", "play"]);
}

#[test]
fn test_repeat_all_on_single_song_restarts_instead_of_reloading() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa")]);
    manager.play_at(0);
    manager.toggle_repeat(); // all
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    bridge.sync(&mut manager);
    widget.clear();

    bridge.push_event(WidgetEvent::Ended);
    bridge.sync(&mut manager);

    assert_eq!(manager.current_index(), 0);
    assert!(manager.is_playing());
    assert_eq!(widget.commands(), ["seek:0", "play"]);
}

// ===== Sleep Timer =====

#[test]
fn test_end_of_track_sleep_stops_instead_of_advancing() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa"), ("2", "bbbbbbbbbbb")]);
    manager.play_at(0);
    manager.set_sleep_timer(SleepRequest::EndOfTrack);
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    bridge.sync(&mut manager);
    widget.clear();

    bridge.push_event(WidgetEvent::Ended);
    bridge.sync(&mut manager);

    assert!(!manager.is_playing());
    assert_eq!(manager.current_index(), 0);
    assert_eq!(widget.commands(), ["pause"]);
    assert!(!manager.sleep_timer_active());
}

#[test]
fn test_countdown_expiry_pauses_widget_through_tick() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa")]);
    manager.play_at(0);
    manager.set_sleep_timer(SleepRequest::Minutes(1));
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    bridge.sync(&mut manager);
    widget.clear();

    for _ in 0..60 {
        bridge.tick(&mut manager);
    }

    assert!(!manager.is_playing());
    assert_eq!(widget.commands(), ["pause"]);
}

// ===== Progress Polling =====

#[test]
fn test_tick_polls_position_while_playing() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa")]);
    manager.play_at(0);
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    bridge.sync(&mut manager);

    widget.set_time(42.5);
    bridge.tick(&mut manager);
    assert_eq!(bridge.current_time(), 42.5);
}

#[test]
fn test_tick_does_not_poll_while_paused() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa")]);
    manager.play_at(0);
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    bridge.sync(&mut manager);

    widget.set_time(10.0);
    bridge.tick(&mut manager);

    manager.set_playing(false);
    bridge.sync(&mut manager);
    widget.set_time(99.0);
    bridge.tick(&mut manager);
    assert_eq!(bridge.current_time(), 10.0);
}

// ===== Failure Tolerance =====

#[test]
fn test_widget_errors_degrade_without_crashing() {
    let (mut manager, mut bridge, widget) = setup(&[("1", "aaaaaaaaaaa")]);
    manager.play_at(0);
    bridge.push_event(WidgetEvent::Ready {
        duration_seconds: 100.0,
    });
    widget.set_failing(true);

    // Load is rejected; bridge does nothing this tick.
    bridge.sync(&mut manager);
    assert!(widget.commands().is_empty());

    // Once the widget recovers, the load goes through on a later sync.
    widget.set_failing(false);
    bridge.sync(&mut manager);
    assert_eq!(widget.commands(), ["load:aaaaaaaaaaa", "play"]);
}

#[test]
fn test_keep_alive_failures_are_tolerated() {
    let widget = FakeWidget::default();
    let keep_alive = FakeKeepAlive {
        fail: true,
        ..Default::default()
    };
    // Construction and teardown must both survive a dead audio subsystem.
    let bridge = PlayerBridge::new(Box::new(widget), Box::new(keep_alive));
    drop(bridge);
}

#[test]
fn test_keep_alive_released_on_drop() {
    let keep_alive = FakeKeepAlive::default();
    let log = keep_alive.log.clone();
    let bridge = PlayerBridge::new(Box::new(FakeWidget::default()), Box::new(keep_alive));
    assert_eq!(*log.borrow(), ["start"]);

    drop(bridge);
    assert_eq!(*log.borrow(), ["start", "stop"]);
}
