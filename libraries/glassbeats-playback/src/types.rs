//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when queue ends
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Cycle to the next mode: Off -> All -> One -> Off
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Configuration for the playback manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial volume (0-100, default: 50)
    pub volume: u8,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 50,
            repeat: RepeatMode::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_mode_cycle_length_is_three() {
        let mode = RepeatMode::Off;
        assert_eq!(mode.cycled(), RepeatMode::All);
        assert_eq!(mode.cycled().cycled(), RepeatMode::One);
        assert_eq!(mode.cycled().cycled().cycled(), RepeatMode::Off);
    }

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.volume, 50);
        assert_eq!(config.repeat, RepeatMode::Off);
    }
}
