use crate::Result;
use std::path::Path;

pub trait TtsEngine {
    /// Sample rate of the produced PCM, declared by the voice model.
    fn sample_rate_hz(&self) -> u32;

    /// Synthesize mono S16 PCM as a sequence of chunks, in playback order.
    fn synthesize(&mut self, text: &str) -> Result<Vec<Vec<i16>>>;
}

/// A mono S16 output stream that is started, fed and stopped around each utterance.
pub trait AudioSink {
    fn start(&mut self) -> Result<()>;

    /// Write one chunk. Blocks until the chunk has been played.
    fn write(&mut self, pcm: &[i16]) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    fn is_active(&self) -> bool;

    /// Release the output device.
    fn close(&mut self) -> Result<()>;
}

pub trait TrackPlayer {
    /// Start playing an audio file and return without waiting for it to finish.
    fn play(&mut self, path: &Path) -> Result<()>;
}
