//! Cleanup of model output before it is spoken

use crate::Result;
use regex::Regex;

/// Turns raw language-model output into text that reads well through speech synthesis.
pub struct TextNormalizer {
    think_tags: Regex,
    symbols: Regex,
    unspeakable: Regex,
}

impl TextNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            think_tags: Regex::new(r"</?think>")?,
            symbols: Regex::new(r"[*_/\\\[\]()<>{}:]")?,
            unspeakable: Regex::new(r"[^\w\s,.!?]")?,
        })
    }

    /// Drop `<think>`/`</think>` markers, keeping the reasoning text between them.
    pub fn strip_think_tags(&self, text: &str) -> String {
        self.think_tags.replace_all(text, "").trim().to_string()
    }

    /// Remove brackets, slashes, colons and markdown emphasis.
    pub fn strip_symbols(&self, text: &str) -> String {
        self.symbols.replace_all(text, "").into_owned()
    }

    /// Keep only word characters, whitespace and `, . ! ?`.
    pub fn keep_speakable(&self, text: &str) -> String {
        self.unspeakable.replace_all(text, "").into_owned()
    }

    /// All three passes in order, trimmed. Applying it twice changes nothing.
    pub fn normalize(&self, text: &str) -> String {
        let text = self.strip_think_tags(text);
        let text = self.strip_symbols(&text);
        self.keep_speakable(&text).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn keeps_reasoning_inside_think_tags() {
        let n = TextNormalizer::new().unwrap();
        assert_eq!(
            n.strip_think_tags("<think>pondering</think> Hello!"),
            "pondering Hello!"
        );
    }

    #[test]
    fn strips_markdown_and_symbols() {
        let n = TextNormalizer::new().unwrap();
        assert_eq!(
            n.normalize("**Sure:** here's (a) [list] {of} <things> / and #tags & more"),
            "Sure heres a list of things  and tags  more"
        );
    }

    #[test]
    fn keeps_sentence_punctuation_and_unicode_letters() {
        let n = TextNormalizer::new().unwrap();
        assert_eq!(n.normalize("Café, naïve! Why? Yes."), "Café, naïve! Why? Yes.");
        assert_eq!(n.normalize("I'm 100% sure 🤖"), "Im 100 sure");
    }

    #[test]
    fn symbol_only_reply_becomes_empty() {
        let n = TextNormalizer::new().unwrap();
        assert_eq!(n.normalize("<think></think> :) -- *"), "");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "\\PC*") {
            let n = TextNormalizer::new().unwrap();
            let once = n.normalize(&s);
            prop_assert_eq!(n.normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent_on_model_like_text(
            s in "(<think>|</think>|[a-zA-Z0-9 _:()<>{}/*!?.,'#\\[\\]\\-\n\t]){0,64}"
        ) {
            let n = TextNormalizer::new().unwrap();
            let once = n.normalize(&s);
            prop_assert_eq!(n.normalize(&once), once.clone());
            prop_assert!(!once.contains('<') && !once.contains(':') && !once.contains('_'));
        }
    }
}
