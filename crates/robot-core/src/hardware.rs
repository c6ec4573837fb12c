use crate::Result;
use actuators::{Motor, Servo, WheelPair};
use camera::{Preview, StillCamera};
use chat_client::ChatClient;
use tracing::debug;
use voice_local::{AudioSink, TrackPlayer, TtsEngine};

/// Operator-facing text output (status lines, the assistant's printed reply).
pub trait Console {
    fn line(&mut self, text: &str);
}

pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Every device and service the robot talks to, constructed once at startup and lent to
/// the dispatcher and handlers.
pub struct Hardware {
    /// Face servo.
    pub servo: Box<dyn Servo>,
    pub wheels: Box<dyn WheelPair>,
    pub torso: Box<dyn Motor>,
    pub camera: Box<dyn StillCamera>,
    pub preview: Box<dyn Preview>,
    pub voice: Box<dyn TtsEngine>,
    pub audio: Box<dyn AudioSink>,
    pub player: Box<dyn TrackPlayer>,
    pub chat: Box<dyn ChatClient>,
    pub console: Box<dyn Console>,
}

impl Hardware {
    /// Synthesize `text` and play it, returning once playback has finished.
    pub fn speak(&mut self, text: &str) -> Result<()> {
        let chunks = self.voice.synthesize(text)?;
        debug!(chars = text.len(), chunks = chunks.len(), "speaking");
        self.audio.start()?;
        for chunk in &chunks {
            self.audio.write(chunk)?;
        }
        self.audio.stop()?;
        Ok(())
    }

    pub fn print(&mut self, text: &str) {
        self.console.line(text);
    }

    /// Stop the audio stream if it is still running and release the device.
    pub fn close(&mut self) -> Result<()> {
        if self.audio.is_active() {
            self.audio.stop()?;
        }
        self.audio.close()?;
        Ok(())
    }
}
