use thiserror::Error;

pub type Result<T, E = VoiceError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("voice model not found: {0}")]
    ModelNotFound(String),
    #[error("invalid voice model config: {0}")]
    ModelConfig(String),
    #[error("synthesis failed: {0}")]
    Synthesis(String),
    #[error("audio device error: {0}")]
    Device(String),
    #[error("audio stream is not started")]
    NotStarted,
    #[error("cannot decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
