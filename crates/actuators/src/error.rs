use thiserror::Error;

pub type Result<T, E = ActuatorError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("device not found: {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("angle {angle} outside servo range {min}..={max}")]
    AngleOutOfRange { angle: f32, min: f32, max: f32 },
    #[error("speed {0} outside -100..=100")]
    SpeedOutOfRange(i32),
}
