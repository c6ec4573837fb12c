use crate::{ChatMessage, Result};

pub trait ChatClient {
    /// Request one assistant reply for the given history.
    fn complete(&mut self, model: &str, messages: &[ChatMessage]) -> Result<String>;
}
