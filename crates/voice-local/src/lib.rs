//! voice-local: speech synthesis, audio output and track playback for the robot's voice

mod types;
pub use types::{AudioEvent, TtsConfig};

mod error;
pub use error::{Result, VoiceError};

mod traits;
pub use traits::{AudioSink, TrackPlayer, TtsEngine};

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{AudioLog, MockPlayer, MockSink, MockTts, SpeechLog};

#[cfg(feature = "piper")]
mod piper;
#[cfg(feature = "piper")]
pub use piper::PiperTts;

#[cfg(feature = "audio")]
pub mod decode;

#[cfg(feature = "audio")]
mod output;
#[cfg(feature = "audio")]
pub use output::{CpalSink, CpalTrackPlayer};
