//! Sleep timer
//!
//! An independent countdown that forces playback to pause on expiry. At
//! most one timer is active; setting a new one replaces the old. The
//! "end of current track" variant is a distinct mode consulted by the
//! bridge's ended handling, never a zero-length countdown.

/// What the user asked the sleep timer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepRequest {
    /// Pause after this many minutes
    Minutes(u32),

    /// Pause when the current track finishes
    EndOfTrack,
}

/// Active sleep timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SleepSetting {
    /// Ticking countdown, seconds remaining
    Countdown {
        /// Seconds until forced pause
        remaining_seconds: u32,
    },

    /// No countdown; pause at the end of the current track
    EndOfTrack,
}

/// Outcome of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepTick {
    /// No countdown running
    Idle,

    /// Still counting; seconds remaining
    Running(u32),

    /// The countdown just hit zero; the timer cleared itself
    Expired,
}

/// One-at-a-time sleep timer.
#[derive(Debug, Clone, Default)]
pub struct SleepTimer {
    setting: Option<SleepSetting>,
}

impl SleepTimer {
    /// Create an inactive timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or replace) the timer.
    pub fn set(&mut self, request: SleepRequest) {
        self.setting = Some(match request {
            SleepRequest::Minutes(minutes) => SleepSetting::Countdown {
                remaining_seconds: minutes * 60,
            },
            SleepRequest::EndOfTrack => SleepSetting::EndOfTrack,
        });
    }

    /// Cancel any active timer. Returns true when one was running.
    pub fn cancel(&mut self) -> bool {
        self.setting.take().is_some()
    }

    /// Whether any timer (countdown or end-of-track) is active
    pub fn is_active(&self) -> bool {
        self.setting.is_some()
    }

    /// Seconds remaining, when a countdown is running
    pub fn remaining_seconds(&self) -> Option<u32> {
        match self.setting {
            Some(SleepSetting::Countdown { remaining_seconds }) => Some(remaining_seconds),
            _ => None,
        }
    }

    /// Whether the end-of-track variant is armed
    pub fn is_end_of_track(&self) -> bool {
        matches!(self.setting, Some(SleepSetting::EndOfTrack))
    }

    /// Consume the end-of-track arm, when set.
    ///
    /// Called by the bridge when the widget reports the track ended;
    /// returns true when playback should stop instead of advancing.
    pub fn take_end_of_track(&mut self) -> bool {
        if self.is_end_of_track() {
            self.setting = None;
            true
        } else {
            false
        }
    }

    /// Advance the countdown by one second.
    ///
    /// On reaching zero the timer clears itself and reports `Expired`;
    /// the caller is responsible for pausing playback.
    pub fn tick(&mut self) -> SleepTick {
        match &mut self.setting {
            Some(SleepSetting::Countdown { remaining_seconds }) => {
                *remaining_seconds = remaining_seconds.saturating_sub(1);
                if *remaining_seconds == 0 {
                    self.setting = None;
                    SleepTick::Expired
                } else {
                    SleepTick::Running(*remaining_seconds)
                }
            }
            _ => SleepTick::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_runs_to_expiry() {
        let mut timer = SleepTimer::new();
        timer.set(SleepRequest::Minutes(1));
        assert_eq!(timer.remaining_seconds(), Some(60));

        for expected in (1..60).rev() {
            assert_eq!(timer.tick(), SleepTick::Running(expected));
        }
        assert_eq!(timer.tick(), SleepTick::Expired);
        assert!(!timer.is_active());
        assert_eq!(timer.remaining_seconds(), None);
    }

    #[test]
    fn cancel_clears_countdown_early() {
        let mut timer = SleepTimer::new();
        timer.set(SleepRequest::Minutes(1));
        for _ in 0..10 {
            timer.tick();
        }
        assert!(timer.cancel());
        assert_eq!(timer.remaining_seconds(), None);
        assert_eq!(timer.tick(), SleepTick::Idle);
    }

    #[test]
    fn cancel_without_timer_reports_false() {
        let mut timer = SleepTimer::new();
        assert!(!timer.cancel());
    }

    #[test]
    fn setting_a_new_timer_replaces_the_old() {
        let mut timer = SleepTimer::new();
        timer.set(SleepRequest::Minutes(30));
        timer.set(SleepRequest::Minutes(1));
        assert_eq!(timer.remaining_seconds(), Some(60));
    }

    #[test]
    fn end_of_track_does_not_tick() {
        let mut timer = SleepTimer::new();
        timer.set(SleepRequest::EndOfTrack);
        assert!(timer.is_end_of_track());
        assert_eq!(timer.remaining_seconds(), None);
        assert_eq!(timer.tick(), SleepTick::Idle);
        assert!(timer.is_active());
    }

    #[test]
    fn take_end_of_track_consumes_the_arm() {
        let mut timer = SleepTimer::new();
        timer.set(SleepRequest::EndOfTrack);
        assert!(timer.take_end_of_track());
        assert!(!timer.is_active());
        assert!(!timer.take_end_of_track());
    }

    #[test]
    fn end_of_track_replaces_countdown() {
        let mut timer = SleepTimer::new();
        timer.set(SleepRequest::Minutes(5));
        timer.set(SleepRequest::EndOfTrack);
        assert!(timer.is_end_of_track());
        assert_eq!(timer.remaining_seconds(), None);
    }
}
