use crate::{Direction, Expression, Persona, Result, RobotError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a matched keyword does. Entries carry only the data their handler needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "arg", rename_all = "snake_case")]
pub enum Command {
    Introduce,
    Say,
    Dance,
    Expression(Expression),
    Move(Direction),
    Photo,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub keyword: String,
    /// Spoken before the command runs.
    pub acknowledgement: String,
    pub command: Command,
}

impl CommandEntry {
    fn new(keyword: &str, acknowledgement: impl Into<String>, command: Command) -> Self {
        Self {
            keyword: keyword.to_string(),
            acknowledgement: acknowledgement.into(),
            command,
        }
    }
}

/// Ordered keyword table. The first entry whose keyword occurs anywhere in the input wins,
/// so entry order decides between inputs that contain several keywords.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    entries: Vec<CommandEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CommandEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(entries.len());
        for mut entry in entries {
            entry.keyword = entry.keyword.trim().to_lowercase();
            if entry.keyword.is_empty() {
                return Err(RobotError::Catalog("empty keyword".into()));
            }
            if !seen.insert(entry.keyword.clone()) {
                return Err(RobotError::Catalog(format!(
                    "duplicate keyword {:?}",
                    entry.keyword
                )));
            }
            out.push(entry);
        }
        Ok(Self { entries: out })
    }

    /// The robot's built-in commands, with acknowledgements filled in from the persona.
    pub fn standard(persona: &Persona) -> Result<Self> {
        Self::new(vec![
            CommandEntry::new(
                "introduce",
                format!("My name is {}. I am a robot {}", persona.name, persona.role),
                Command::Introduce,
            ),
            CommandEntry::new("say", "What would you like me to say?", Command::Say),
            CommandEntry::new(
                "dance",
                "What would you like me to dance? 1. Macarena 2. Kong Fu Or 3. A P T ?",
                Command::Dance,
            ),
            CommandEntry::new(
                "happy",
                "This is my happy face!",
                Command::Expression(Expression::Happy),
            ),
            CommandEntry::new(
                "sad",
                "This is my sad face.",
                Command::Expression(Expression::Sad),
            ),
            CommandEntry::new(
                "kiss",
                "Give us a kiss.",
                Command::Expression(Expression::Kiss),
            ),
            CommandEntry::new("forward", "Moving forward.", Command::Move(Direction::Forward)),
            CommandEntry::new(
                "backward",
                "Moving backward.",
                Command::Move(Direction::Backward),
            ),
            CommandEntry::new("left", "Turning left.", Command::Move(Direction::Left)),
            CommandEntry::new("right", "Turning right.", Command::Move(Direction::Right)),
            CommandEntry::new("body", "Rotating Body.", Command::Move(Direction::Body)),
            CommandEntry::new("photo", "Taking a photo now.", Command::Photo),
            CommandEntry::new(
                "chat",
                format!(
                    "{} is ready to chat. What would you like to talk about? or you can type exit to quit.",
                    persona.name
                ),
                Command::Chat,
            ),
        ])
    }

    /// Substring match against the lower-cased input, in catalog order.
    pub fn lookup(&self, input: &str) -> Option<&CommandEntry> {
        let input = input.to_lowercase();
        self.entries.iter().find(|e| input.contains(&e.keyword))
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Catalog {
        Catalog::standard(&Persona::default()).unwrap()
    }

    #[test]
    fn standard_order_and_acks() {
        let c = standard();
        let keywords: Vec<_> = c.entries().iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(
            keywords,
            [
                "introduce", "say", "dance", "happy", "sad", "kiss", "forward", "backward",
                "left", "right", "body", "photo", "chat"
            ]
        );
        assert_eq!(
            c.lookup("introduce").unwrap().acknowledgement,
            "My name is AlphaMini. I am a robot assistant"
        );
        assert!(c.lookup("CHAT please").unwrap().acknowledgement.starts_with("AlphaMini is ready"));
    }

    #[test]
    fn first_match_wins() {
        let c = standard();
        // "dance" precedes "happy" in catalog order, regardless of position in the input.
        assert_eq!(c.lookup("happy dance").unwrap().command, Command::Dance);
        assert_eq!(
            c.lookup("turn left then right").unwrap().command,
            Command::Move(Direction::Left)
        );
    }

    #[test]
    fn matches_inside_longer_words() {
        let c = standard();
        assert_eq!(c.lookup("essay").unwrap().command, Command::Say);
        assert_eq!(
            c.lookup("unhappy").unwrap().command,
            Command::Expression(Expression::Happy)
        );
        assert_eq!(c.lookup("somebody").unwrap().command, Command::Move(Direction::Body));
        assert!(c.lookup("hello there").is_none());
        assert!(c.lookup("").is_none());
    }

    #[test]
    fn rejects_duplicate_and_empty_keywords() {
        let dup = vec![
            CommandEntry::new("Wave", "a", Command::Say),
            CommandEntry::new("wave", "b", Command::Chat),
        ];
        assert!(matches!(Catalog::new(dup), Err(RobotError::Catalog(_))));
        let empty = vec![CommandEntry::new("  ", "a", Command::Say)];
        assert!(Catalog::new(empty).is_err());
    }

    #[test]
    fn entries_serialize_as_tagged_data() {
        let c = standard();
        let json = serde_json::to_value(&c.entries()[3]).unwrap();
        assert_eq!(json["command"]["kind"], "expression");
        assert_eq!(json["command"]["arg"], "happy");
        let back: Command = serde_json::from_str(r#"{"kind":"photo"}"#).unwrap();
        assert_eq!(back, Command::Photo);
    }
}
