use crate::{AudioEvent, AudioSink, Result, TrackPlayer, TtsConfig, TtsEngine, VoiceError};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

/// Texts handed to the mock synthesizer, in order.
#[derive(Clone, Debug, Default)]
pub struct SpeechLog {
    texts: Arc<Mutex<Vec<String>>>,
}

impl SpeechLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.texts.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.texts.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.texts.lock().clear();
    }
}

/// Calls made on the mock sink and player, in order.
#[derive(Clone, Debug, Default)]
pub struct AudioLog {
    events: Arc<Mutex<Vec<AudioEvent>>>,
}

impl AudioLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AudioEvent> {
        self.events.lock().clone()
    }

    pub fn played(&self) -> Vec<std::path::PathBuf> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                AudioEvent::Played(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: AudioEvent) {
        self.events.lock().push(event);
    }
}

/// Synthesizer producing a short sine tone per utterance, split into fixed-size chunks.
pub struct MockTts {
    cfg: TtsConfig,
    log: SpeechLog,
}

impl MockTts {
    const CHUNK: usize = 1024;

    pub fn new(config: TtsConfig, log: SpeechLog) -> Self {
        Self { cfg: config, log }
    }
}

impl TtsEngine for MockTts {
    fn sample_rate_hz(&self) -> u32 {
        self.cfg.sample_rate_hz
    }

    fn synthesize(&mut self, text: &str) -> Result<Vec<Vec<i16>>> {
        self.log.texts.lock().push(text.to_string());
        let sr = self.cfg.sample_rate_hz.max(8000);
        let dur_s = (text.len() as f32 / 10.0).clamp(0.05, 0.2);
        let frames = (sr as f32 * dur_s) as usize;
        let freq = 440.0_f32;
        let pcm: Vec<i16> = (0..frames)
            .map(|n| {
                let t = n as f32 / sr as f32;
                ((2.0 * std::f32::consts::PI * freq * t).sin() * 3000.0) as i16
            })
            .collect();
        Ok(pcm.chunks(Self::CHUNK).map(<[i16]>::to_vec).collect())
    }
}

/// Output stream that records start/write/stop instead of playing.
#[derive(Default)]
pub struct MockSink {
    log: AudioLog,
    active: bool,
    closed: bool,
}

impl MockSink {
    pub fn new(log: AudioLog) -> Self {
        Self {
            log,
            active: false,
            closed: false,
        }
    }
}

impl AudioSink for MockSink {
    fn start(&mut self) -> Result<()> {
        if self.closed {
            return Err(VoiceError::Device("stream closed".into()));
        }
        self.active = true;
        self.log.push(AudioEvent::Started);
        Ok(())
    }

    fn write(&mut self, pcm: &[i16]) -> Result<()> {
        if !self.active {
            return Err(VoiceError::NotStarted);
        }
        self.log.push(AudioEvent::Wrote(pcm.len()));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.active = false;
        self.log.push(AudioEvent::Stopped);
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn close(&mut self) -> Result<()> {
        self.active = false;
        self.closed = true;
        self.log.push(AudioEvent::Closed);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockPlayer {
    log: AudioLog,
}

impl MockPlayer {
    pub fn new(log: AudioLog) -> Self {
        Self { log }
    }
}

impl TrackPlayer for MockPlayer {
    fn play(&mut self, path: &Path) -> Result<()> {
        self.log.push(AudioEvent::Played(path.to_path_buf()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_tts_chunks_and_records() {
        let log = SpeechLog::new();
        let mut tts = MockTts::new(TtsConfig::default(), log.clone());
        let chunks = tts.synthesize("hello there").unwrap();
        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| c.len() <= 1024));
        assert_eq!(log.spoken(), vec!["hello there".to_string()]);
        assert_eq!(tts.sample_rate_hz(), 22050);
    }

    #[test]
    fn sink_rejects_write_before_start_and_after_close() {
        let log = AudioLog::new();
        let mut sink = MockSink::new(log.clone());
        assert!(matches!(sink.write(&[0; 4]), Err(VoiceError::NotStarted)));
        sink.start().unwrap();
        sink.write(&[0; 4]).unwrap();
        sink.stop().unwrap();
        sink.close().unwrap();
        assert!(sink.start().is_err());
        assert_eq!(
            log.events(),
            vec![
                AudioEvent::Started,
                AudioEvent::Wrote(4),
                AudioEvent::Stopped,
                AudioEvent::Closed
            ]
        );
    }
}
