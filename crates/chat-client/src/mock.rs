use crate::{ChatClient, ChatError, ChatMessage, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Requests received by [`ScriptedChat`], each as (model, messages).
#[derive(Clone, Debug, Default)]
pub struct ChatLog {
    requests: Arc<Mutex<Vec<(String, Vec<ChatMessage>)>>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.requests.lock().clone()
    }
}

/// Replies from a fixed script, then echoes the last user message once the script runs out.
pub struct ScriptedChat {
    replies: VecDeque<String>,
    log: ChatLog,
}

impl ScriptedChat {
    pub fn new<I, S>(replies: I, log: ChatLog) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            log,
        }
    }
}

impl ChatClient for ScriptedChat {
    fn complete(&mut self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        if messages.is_empty() {
            return Err(ChatError::EmptyHistory);
        }
        self.log
            .requests
            .lock()
            .push((model.to_string(), messages.to_vec()));
        if let Some(reply) = self.replies.pop_front() {
            return Ok(reply);
        }
        let last = messages
            .iter()
            .rev()
            .find(|m| m.role == crate::Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("");
        Ok(format!("You said: {last}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_then_echo() {
        let log = ChatLog::new();
        let mut chat = ScriptedChat::new(["first"], log.clone());
        let history = vec![ChatMessage::system("sys"), ChatMessage::user("ping")];
        assert_eq!(chat.complete("m", &history).unwrap(), "first");
        assert_eq!(chat.complete("m", &history).unwrap(), "You said: ping");
        assert_eq!(log.requests().len(), 2);
        assert_eq!(log.requests()[0].0, "m");
        assert!(matches!(chat.complete("m", &[]), Err(ChatError::EmptyHistory)));
    }
}
