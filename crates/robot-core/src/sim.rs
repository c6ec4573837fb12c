//! Fully simulated hardware, for `--sim` runs and tests.

use crate::{Console, Hardware};
use actuators::{ActuatorLog, MockMotor, MockServo, MockWheelPair};
use camera::{CameraLog, MockCamera, MockPreview};
use chat_client::{ChatLog, ScriptedChat};
use parking_lot::Mutex;
use std::sync::Arc;
use voice_local::{AudioLog, MockPlayer, MockSink, MockTts, SpeechLog, TtsConfig};

/// Lines written to a [`RecordingConsole`].
#[derive(Clone, Debug, Default)]
pub struct ConsoleLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl ConsoleLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

/// Console that keeps lines instead of printing them.
pub struct RecordingConsole {
    log: ConsoleLog,
}

impl RecordingConsole {
    pub fn new(log: ConsoleLog) -> Self {
        Self { log }
    }
}

impl Console for RecordingConsole {
    fn line(&mut self, text: &str) {
        self.log.lines.lock().push(text.to_string());
    }
}

/// Journals of everything the simulated devices were asked to do.
#[derive(Clone, Debug, Default)]
pub struct SimHandles {
    pub actuators: ActuatorLog,
    pub camera: CameraLog,
    pub speech: SpeechLog,
    pub audio: AudioLog,
    pub chat: ChatLog,
    pub console: ConsoleLog,
}

/// Build a [`Hardware`] made only of mocks. The chat service answers with `replies` in order
/// and then echoes the operator.
pub fn simulated(replies: Vec<String>) -> (Hardware, SimHandles) {
    let handles = SimHandles::default();
    let hw = Hardware {
        servo: Box::new(MockServo::new(handles.actuators.clone())),
        wheels: Box::new(MockWheelPair::new(handles.actuators.clone())),
        torso: Box::new(MockMotor::new(handles.actuators.clone())),
        camera: Box::new(MockCamera::new(handles.camera.clone())),
        preview: Box::new(MockPreview::new(handles.camera.clone())),
        voice: Box::new(MockTts::new(TtsConfig::default(), handles.speech.clone())),
        audio: Box::new(MockSink::new(handles.audio.clone())),
        player: Box::new(MockPlayer::new(handles.audio.clone())),
        chat: Box::new(ScriptedChat::new(replies, handles.chat.clone())),
        console: Box::new(RecordingConsole::new(handles.console.clone())),
    };
    (hw, handles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_local::AudioEvent;

    #[test]
    fn speak_and_close_drive_the_sink() {
        let (mut hw, sim) = simulated(Vec::new());
        hw.speak("hi").unwrap();
        hw.close().unwrap();
        let events = sim.audio.events();
        assert_eq!(events.first(), Some(&AudioEvent::Started));
        assert!(matches!(events[1], AudioEvent::Wrote(_)));
        assert_eq!(&events[events.len() - 2..], &[AudioEvent::Stopped, AudioEvent::Closed]);
        assert_eq!(sim.speech.spoken(), vec!["hi".to_string()]);
    }

    #[test]
    fn close_stops_an_active_stream_first() {
        let (mut hw, sim) = simulated(Vec::new());
        hw.audio.start().unwrap();
        hw.close().unwrap();
        assert_eq!(
            sim.audio.events(),
            vec![AudioEvent::Started, AudioEvent::Stopped, AudioEvent::Closed]
        );
    }
}
