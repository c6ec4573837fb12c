//! Blocking client for Ollama's `/api/chat` endpoint.

use crate::{ChatClient, ChatError, ChatMessage, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct OllamaChat {
    endpoint: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaChat {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:11434`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = format!("{}/api/chat", base_url.trim_end_matches('/'));
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        info!(%endpoint, "ollama chat client");
        Ok(Self { endpoint, client })
    }
}

fn parse_reply(body: &str) -> Result<String> {
    let resp: ChatResponse =
        serde_json::from_str(body).map_err(|e| ChatError::Decode(e.to_string()))?;
    Ok(resp.message.content)
}

impl ChatClient for OllamaChat {
    fn complete(&mut self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        if messages.is_empty() {
            return Err(ChatError::EmptyHistory);
        }
        let req = ChatRequest {
            model,
            messages,
            stream: false,
        };
        let start = Instant::now();
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&req)
            .send()
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let reply = parse_reply(&body)?;
        debug!(
            model,
            messages = messages.len(),
            reply_chars = reply.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "chat completion"
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_shape() {
        let messages = vec![ChatMessage::system("s"), ChatMessage::user("u")];
        let req = ChatRequest {
            model: "gemma2:2b",
            messages: &messages,
            stream: false,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "gemma2:2b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn parses_non_streaming_reply() {
        let body = r#"{"model":"gemma2:2b","created_at":"2025-01-01T00:00:00Z",
            "message":{"role":"assistant","content":"Hello!"},"done":true}"#;
        assert_eq!(parse_reply(body).unwrap(), "Hello!");
        assert!(matches!(parse_reply("{}"), Err(ChatError::Decode(_))));
    }
}
