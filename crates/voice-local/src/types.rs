use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    pub sample_rate_hz: u32,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 22050,
        }
    }
}

/// One call observed at the audio boundary by the mocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioEvent {
    Started,
    Wrote(usize),
    Stopped,
    Closed,
    Played(PathBuf),
}
