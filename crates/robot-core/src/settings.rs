use camera::StillConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Fixed pauses in the action handlers, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub servo_settle_ms: u64,
    pub dance_pause_ms: u64,
    pub photo_countdown_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            servo_settle_ms: 1500,
            dance_pause_ms: 1000,
            photo_countdown_ms: 10_000,
        }
    }
}

impl Timings {
    /// No waiting at all, for simulation and tests.
    pub fn immediate() -> Self {
        Self {
            servo_settle_ms: 0,
            dance_pause_ms: 0,
            photo_countdown_ms: 0,
        }
    }

    pub fn servo_settle(&self) -> Duration {
        Duration::from_millis(self.servo_settle_ms)
    }

    pub fn dance_pause(&self) -> Duration {
        Duration::from_millis(self.dance_pause_ms)
    }

    pub fn photo_countdown(&self) -> Duration {
        Duration::from_millis(self.photo_countdown_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotSettings {
    /// Chat model identifier passed to the completion service.
    pub model: String,
    /// Most recent messages sent with each chat request besides the system message;
    /// 0 sends the whole transcript.
    pub history_window: usize,
    pub photo_dir: PathBuf,
    pub tracks_dir: PathBuf,
    pub still: StillConfig,
    pub timings: Timings,
}

impl Default for RobotSettings {
    fn default() -> Self {
        Self {
            model: "gemma2:2b".to_string(),
            history_window: 0,
            photo_dir: PathBuf::from("."),
            tracks_dir: PathBuf::from("."),
            still: StillConfig::default(),
            timings: Timings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_defaults() {
        let s: RobotSettings =
            serde_json::from_str(r#"{"history_window": 8, "timings": {"dance_pause_ms": 5}}"#)
                .unwrap();
        assert_eq!(s.model, "gemma2:2b");
        assert_eq!(s.history_window, 8);
        assert_eq!(s.timings.dance_pause(), Duration::from_millis(5));
        assert_eq!(s.timings.servo_settle(), Duration::from_millis(1500));
        assert_eq!(s.still.width, 1640);
    }
}
