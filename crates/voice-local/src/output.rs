use crate::decode::decode_file;
use crate::{AudioSink, Result, TrackPlayer, VoiceError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

fn default_output() -> Result<cpal::Device> {
    cpal::default_host()
        .default_output_device()
        .ok_or_else(|| VoiceError::Device("no default output device".into()))
}

/// Mono output stream at the voice's sample rate. `write` queues a chunk and waits for the
/// device callback to drain it.
pub struct CpalSink {
    device: cpal::Device,
    config: cpal::StreamConfig,
    queue: Arc<Mutex<VecDeque<f32>>>,
    stream: Option<cpal::Stream>,
    active: bool,
}

impl CpalSink {
    pub fn new(sample_rate_hz: u32) -> Result<Self> {
        let device = default_output()?;
        let name = device.name().unwrap_or_else(|_| "<unknown>".into());
        info!(device = %name, sample_rate_hz, "audio output");
        Ok(Self {
            device,
            config: cpal::StreamConfig {
                channels: 1,
                sample_rate: cpal::SampleRate(sample_rate_hz),
                buffer_size: cpal::BufferSize::Default,
            },
            queue: Arc::new(Mutex::new(VecDeque::new())),
            stream: None,
            active: false,
        })
    }

    fn build(&self) -> Result<cpal::Stream> {
        let queue = Arc::clone(&self.queue);
        self.device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut q = queue.lock();
                    for sample in data.iter_mut() {
                        *sample = q.pop_front().unwrap_or(0.0);
                    }
                },
                |err| error!("audio output stream error: {err}"),
                None,
            )
            .map_err(|e| VoiceError::Device(format!("build output stream: {e}")))
    }

    fn drain(&self) {
        while !self.queue.lock().is_empty() {
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}

impl AudioSink for CpalSink {
    fn start(&mut self) -> Result<()> {
        if self.stream.is_none() {
            self.stream = Some(self.build()?);
        }
        if let Some(stream) = &self.stream {
            stream
                .play()
                .map_err(|e| VoiceError::Device(format!("start output stream: {e}")))?;
        }
        self.active = true;
        Ok(())
    }

    fn write(&mut self, pcm: &[i16]) -> Result<()> {
        if !self.active {
            return Err(VoiceError::NotStarted);
        }
        self.queue
            .lock()
            .extend(pcm.iter().map(|&s| s as f32 / 32768.0));
        self.drain();
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.drain();
        if let Some(stream) = &self.stream {
            stream
                .pause()
                .map_err(|e| VoiceError::Device(format!("stop output stream: {e}")))?;
        }
        self.active = false;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn close(&mut self) -> Result<()> {
        if self.active {
            self.stop()?;
        }
        self.stream = None;
        info!("audio output closed");
        Ok(())
    }
}

/// Fire-and-forget file playback. Starting a new track replaces the one playing.
pub struct CpalTrackPlayer {
    device: cpal::Device,
    current: Option<cpal::Stream>,
}

impl CpalTrackPlayer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            device: default_output()?,
            current: None,
        })
    }
}

impl TrackPlayer for CpalTrackPlayer {
    fn play(&mut self, path: &Path) -> Result<()> {
        let audio = decode_file(path)?;
        let config = cpal::StreamConfig {
            channels: audio.channels,
            sample_rate: cpal::SampleRate(audio.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };
        let samples = Arc::new(audio.samples);
        let mut pos = 0usize;
        let stream = self
            .device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for sample in data.iter_mut() {
                        *sample = samples.get(pos).copied().unwrap_or(0.0);
                        pos += 1;
                    }
                },
                |err| error!("track stream error: {err}"),
                None,
            )
            .map_err(|e| VoiceError::Device(format!("build track stream: {e}")))?;
        stream
            .play()
            .map_err(|e| VoiceError::Device(format!("start track stream: {e}")))?;
        info!(track = %path.display(), "playing");
        self.current = Some(stream);
        Ok(())
    }
}
