//! chat-client: chat-completion services for the robot's conversation mode
//!
//! A [`ChatClient`] takes a model identifier and the ordered message history and returns a
//! single reply. The default build ships a scripted mock; the `ollama` feature talks to a
//! local Ollama server.

mod types;
pub use types::{ChatMessage, Role};

mod error;
pub use error::{ChatError, Result};

mod traits;
pub use traits::ChatClient;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{ChatLog, ScriptedChat};

#[cfg(feature = "ollama")]
mod ollama;
#[cfg(feature = "ollama")]
pub use ollama::OllamaChat;
