use crate::{Result, TtsEngine, VoiceError};
use serde::Deserialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Samples per emitted chunk.
const CHUNK_SAMPLES: usize = 2048;

#[derive(Deserialize)]
struct ModelConfig {
    audio: AudioSection,
}

#[derive(Deserialize)]
struct AudioSection {
    sample_rate: u32,
}

/// Piper voice driven through the `piper` binary in raw-output mode.
///
/// The sample rate comes from the model's sidecar `<model>.onnx.json`.
pub struct PiperTts {
    binary: PathBuf,
    model: PathBuf,
    sample_rate_hz: u32,
}

impl PiperTts {
    pub fn load(binary: impl Into<PathBuf>, model: impl AsRef<Path>) -> Result<Self> {
        let model = model.as_ref();
        if !model.exists() {
            return Err(VoiceError::ModelNotFound(model.display().to_string()));
        }
        let mut sidecar = model.as_os_str().to_owned();
        sidecar.push(".json");
        let raw = std::fs::read_to_string(&sidecar).map_err(|e| {
            VoiceError::ModelConfig(format!("{}: {e}", PathBuf::from(&sidecar).display()))
        })?;
        let sample_rate_hz = parse_sample_rate(&raw)?;
        info!(model = %model.display(), sample_rate_hz, "piper voice loaded");
        Ok(Self {
            binary: binary.into(),
            model: model.to_path_buf(),
            sample_rate_hz,
        })
    }
}

fn parse_sample_rate(raw: &str) -> Result<u32> {
    let cfg: ModelConfig =
        serde_json::from_str(raw).map_err(|e| VoiceError::ModelConfig(e.to_string()))?;
    Ok(cfg.audio.sample_rate)
}

/// Split little-endian S16 bytes into chunks; a trailing odd byte is dropped.
fn pcm_chunks(bytes: &[u8]) -> Vec<Vec<i16>> {
    let samples: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();
    samples.chunks(CHUNK_SAMPLES).map(<[i16]>::to_vec).collect()
}

impl TtsEngine for PiperTts {
    fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    fn synthesize(&mut self, text: &str) -> Result<Vec<Vec<i16>>> {
        let mut child = Command::new(&self.binary)
            .arg("--model")
            .arg(&self.model)
            .arg("--output-raw")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| VoiceError::Synthesis(format!("spawn {}: {e}", self.binary.display())))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
            stdin.write_all(b"\n")?;
        }
        let mut raw = Vec::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_end(&mut raw)?;
        }
        let status = child.wait()?;
        if !status.success() {
            return Err(VoiceError::Synthesis(format!("piper exited with {status}")));
        }
        debug!(bytes = raw.len(), "piper synthesized");
        Ok(pcm_chunks(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_sample_rate_from_sidecar() {
        let raw = r#"{"audio": {"sample_rate": 22050, "quality": "medium"}, "num_speakers": 1}"#;
        assert_eq!(parse_sample_rate(raw).unwrap(), 22050);
        assert!(parse_sample_rate("{}").is_err());
    }

    #[test]
    fn splits_pcm_bytes() {
        let mut bytes = Vec::new();
        for s in 0..(CHUNK_SAMPLES as i16 + 3) {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        bytes.push(0xFF);
        let chunks = pcm_chunks(&bytes);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), CHUNK_SAMPLES);
        assert_eq!(chunks[1], vec![2048, 2049, 2050]);
    }

    #[test]
    fn missing_model_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let res = PiperTts::load("piper", dir.path().join("nope.onnx"));
        assert!(matches!(res, Err(VoiceError::ModelNotFound(_))));
    }
}
