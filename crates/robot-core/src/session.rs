use crate::{Hardware, Persona, Result, TextNormalizer};
use chat_client::{ChatMessage, Role};
use tracing::{debug, warn};

/// Spoken when a chat session ends.
pub const FAREWELL: &str = "Goodbye!";

const SENTINELS: [&str; 3] = ["exit", "quit", "stop"];

/// True for input that ends a chat session, in any letter case.
pub fn is_sentinel(input: &str) -> bool {
    let input = input.trim();
    SENTINELS.iter().any(|s| input.eq_ignore_ascii_case(s))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Listening,
    Terminal,
}

/// Chat transcript for the process lifetime. Always starts with the persona's system message
/// and then alternates user and assistant turns.
#[derive(Debug, Clone)]
pub struct Conversation {
    persona: Persona,
    model: String,
    window: usize,
    history: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(persona: Persona, model: impl Into<String>, window: usize) -> Self {
        let history = vec![ChatMessage::system(persona.system_prompt())];
        Self {
            persona,
            model: model.into(),
            window,
            history,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Messages sent with the next request: the system message and the most recent `window`
    /// turns (all of them when `window` is 0). The tail never starts on an assistant turn.
    pub fn request_window(&self) -> Vec<ChatMessage> {
        let turns = &self.history[1..];
        let mut start = if self.window == 0 {
            0
        } else {
            turns.len().saturating_sub(self.window)
        };
        while turns.get(start).is_some_and(|m| m.role != Role::User) {
            start += 1;
        }
        let mut out = Vec::with_capacity(1 + turns.len() - start);
        out.push(self.history[0].clone());
        out.extend_from_slice(&turns[start..]);
        out
    }

    /// One round trip: ask the chat service, print and speak the cleaned reply.
    /// On a failed request the user turn is dropped again so the transcript stays paired.
    pub fn exchange(
        &mut self,
        hw: &mut Hardware,
        normalizer: &TextNormalizer,
        input: &str,
    ) -> Result<String> {
        self.history.push(ChatMessage::user(input));
        hw.print("Thinking...");
        let request = self.request_window();
        debug!(messages = request.len(), model = %self.model, "chat request");
        let raw = match hw.chat.complete(&self.model, &request) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                self.history.pop();
                return Err(e.into());
            }
        };
        let reply = normalizer.normalize(&raw);
        debug!(raw = raw.len(), cleaned = reply.len(), "chat reply");
        self.history.push(ChatMessage::assistant(reply.clone()));
        hw.print(&format!("\n{}: {}", self.persona.name, reply));
        hw.speak(&reply)?;
        Ok(reply)
    }

    /// Feed one line of operator input to the session.
    pub fn handle(
        &mut self,
        hw: &mut Hardware,
        normalizer: &TextNormalizer,
        input: &str,
    ) -> Result<SessionState> {
        if is_sentinel(input) {
            hw.print("Exiting chat mode...");
            hw.speak(FAREWELL)?;
            return Ok(SessionState::Terminal);
        }
        self.exchange(hw, normalizer, input)?;
        Ok(SessionState::Listening)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulated;

    fn convo(window: usize) -> Conversation {
        Conversation::new(Persona::default(), "gemma2:2b", window)
    }

    #[test]
    fn sentinels_any_case() {
        for s in ["exit", "QUIT", "Stop", " stop "] {
            assert!(is_sentinel(s), "{s}");
        }
        for s in ["stopwatch", "", "exit now"] {
            assert!(!is_sentinel(s), "{s}");
        }
    }

    #[test]
    fn turn_appends_user_then_assistant() {
        let (mut hw, sim) = simulated(vec!["<think>hmm</think> **Hi** there :)".into()]);
        let norm = TextNormalizer::new().unwrap();
        let mut c = convo(0);

        assert_eq!(c.handle(&mut hw, &norm, "hello").unwrap(), SessionState::Listening);
        let h = c.history();
        assert_eq!(h.len(), 3);
        assert_eq!(h[0].role, Role::System);
        assert_eq!(h[1], ChatMessage::user("hello"));
        assert_eq!(h[2], ChatMessage::assistant("hmm Hi there"));
        assert_eq!(sim.speech.last().as_deref(), Some("hmm Hi there"));
        assert_eq!(
            sim.console.lines(),
            vec!["Thinking...".to_string(), "\nAlphaMini: hmm Hi there".to_string()]
        );

        let (model, sent) = &sim.chat.requests()[0];
        assert_eq!(model, "gemma2:2b");
        assert_eq!(sent.len(), 2);
    }

    #[test]
    fn sentinel_ends_without_touching_history() {
        let (mut hw, sim) = simulated(Vec::new());
        let norm = TextNormalizer::new().unwrap();
        let mut c = convo(0);
        assert_eq!(c.handle(&mut hw, &norm, "Exit").unwrap(), SessionState::Terminal);
        assert_eq!(c.history().len(), 1);
        assert_eq!(sim.speech.spoken(), vec![FAREWELL.to_string()]);
        assert!(sim.chat.requests().is_empty());
    }

    fn contents(messages: &[ChatMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.content.as_str()).collect()
    }

    #[test]
    fn window_keeps_system_and_recent_turns() {
        let (mut hw, sim) = simulated(Vec::new());
        let norm = TextNormalizer::new().unwrap();
        let mut c = convo(3);
        for msg in ["one", "two", "three"] {
            c.exchange(&mut hw, &norm, msg).unwrap();
        }
        assert_eq!(c.history().len(), 7);

        let requests = sim.chat.requests();
        assert_eq!(contents(&requests[1].1)[1..], ["one", "You said one", "two"]);
        let last = &requests[2].1;
        assert_eq!(last[0].role, Role::System);
        assert_eq!(contents(last)[1..], ["two", "You said two", "three"]);
    }

    #[test]
    fn window_never_opens_on_assistant_turn() {
        let (mut hw, sim) = simulated(Vec::new());
        let norm = TextNormalizer::new().unwrap();
        let mut c = convo(2);
        c.exchange(&mut hw, &norm, "one").unwrap();
        c.exchange(&mut hw, &norm, "two").unwrap();

        let sent = &sim.chat.requests()[1].1;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1], ChatMessage::user("two"));
        assert_eq!(c.history().len(), 5);
    }
}
