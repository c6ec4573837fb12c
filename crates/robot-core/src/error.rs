use thiserror::Error;

pub type Result<T, E = RobotError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("actuator: {0}")]
    Actuator(#[from] actuators::ActuatorError),
    #[error("camera: {0}")]
    Camera(#[from] camera::Error),
    #[error("voice: {0}")]
    Voice(#[from] voice_local::VoiceError),
    #[error("chat: {0}")]
    Chat(#[from] chat_client::ChatError),
    #[error("config {path}: {reason}")]
    Config { path: String, reason: String },
    #[error("catalog: {0}")]
    Catalog(String),
    #[error("unknown {kind}: {name}")]
    UnknownName { kind: &'static str, name: String },
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
