use thiserror::Error;

pub type Result<T, E = ChatError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("cannot reach chat service: {0}")]
    Transport(String),
    #[error("chat service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed chat response: {0}")]
    Decode(String),
    #[error("chat request has no messages")]
    EmptyHistory,
}
