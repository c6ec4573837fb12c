use crate::actions;
use crate::{
    Catalog, Command, Conversation, Hardware, Persona, Result, RobotSettings, SessionState,
    TextNormalizer,
};
use tracing::{debug, info};

/// Spoken when input matches no command, and for an invalid dance choice.
pub const UNRECOGNIZED: &str = "I do not understand that command.";

/// Top-level input that ends the program.
pub const QUIT_SENTINEL: &str = "quit";

/// What the operator should be asked for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Command,
    SayText,
    TrackChoice,
    ChatTurn,
}

impl Prompt {
    pub fn text(self) -> &'static str {
        match self {
            Prompt::Command => "Type a command (or 'quit' to exit): ",
            Prompt::SayText => "what would you like me to say? ('quit' to exit): ",
            Prompt::TrackChoice => "Choose tracks 1, 2 or 3 ('quit' to exit): ",
            Prompt::ChatTurn => "\nYou: ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue(Prompt),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    AwaitingSay,
    AwaitingTrack,
    Chatting,
}

/// Line-driven command interpreter.
///
/// Each call to [`Dispatcher::handle_line`] consumes one line of operator input. Commands
/// that need more input (say, dance, chat) leave the dispatcher waiting in a sub-state and
/// report which prompt to show; the next line goes to that handler instead of the catalog.
pub struct Dispatcher {
    persona: Persona,
    settings: RobotSettings,
    catalog: Catalog,
    conversation: Conversation,
    normalizer: TextNormalizer,
    mode: Mode,
}

impl Dispatcher {
    pub fn new(persona: Persona, settings: RobotSettings) -> Result<Self> {
        let catalog = Catalog::standard(&persona)?;
        Self::with_catalog(persona, settings, catalog)
    }

    pub fn with_catalog(
        persona: Persona,
        settings: RobotSettings,
        catalog: Catalog,
    ) -> Result<Self> {
        let conversation =
            Conversation::new(persona.clone(), settings.model.clone(), settings.history_window);
        Ok(Self {
            persona,
            settings,
            catalog,
            conversation,
            normalizer: TextNormalizer::new()?,
            mode: Mode::Idle,
        })
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn settings(&self) -> &RobotSettings {
        &self.settings
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Prompt matching the current state.
    pub fn prompt(&self) -> Prompt {
        match self.mode {
            Mode::Idle => Prompt::Command,
            Mode::AwaitingSay => Prompt::SayText,
            Mode::AwaitingTrack => Prompt::TrackChoice,
            Mode::Chatting => Prompt::ChatTurn,
        }
    }

    /// Process one line of input. `quit` ends the program only at the command prompt; inside
    /// a sub-prompt it is handled by that prompt's handler.
    pub fn handle_line(&mut self, hw: &mut Hardware, line: &str) -> Result<Outcome> {
        let mode = std::mem::replace(&mut self.mode, Mode::Idle);
        debug!(?mode, "input line");
        match mode {
            Mode::Idle => {
                if line.trim().eq_ignore_ascii_case(QUIT_SENTINEL) {
                    info!("quit requested");
                    return Ok(Outcome::Quit);
                }
                self.dispatch(hw, line).map(Outcome::Continue)
            }
            Mode::AwaitingSay => {
                actions::say(hw, line)?;
                Ok(Outcome::Continue(Prompt::Command))
            }
            Mode::AwaitingTrack => {
                actions::dance(hw, line, &self.settings)?;
                Ok(Outcome::Continue(Prompt::Command))
            }
            Mode::Chatting => match self.conversation.handle(hw, &self.normalizer, line)? {
                SessionState::Listening => {
                    self.mode = Mode::Chatting;
                    Ok(Outcome::Continue(Prompt::ChatTurn))
                }
                SessionState::Terminal => Ok(Outcome::Continue(Prompt::Command)),
            },
        }
    }

    /// Match `input` against the catalog, speak the acknowledgement and run the command.
    /// Unmatched input only speaks [`UNRECOGNIZED`].
    pub fn dispatch(&mut self, hw: &mut Hardware, input: &str) -> Result<Prompt> {
        let Some(entry) = self.catalog.lookup(input) else {
            debug!(input, "no command matched");
            hw.speak(UNRECOGNIZED)?;
            return Ok(Prompt::Command);
        };
        let command = entry.command;
        info!(keyword = %entry.keyword, ?command, "command");
        hw.speak(&entry.acknowledgement)?;

        let timings = &self.settings.timings;
        match command {
            Command::Introduce => actions::introduce(hw, &self.persona, timings)?,
            Command::Expression(expression) => {
                actions::change_expression(hw, expression, timings)?;
            }
            Command::Move(direction) => actions::move_robot(hw, direction)?,
            Command::Photo => {
                actions::take_photo(hw, &self.settings)?;
            }
            Command::Say => self.mode = Mode::AwaitingSay,
            Command::Dance => self.mode = Mode::AwaitingTrack,
            Command::Chat => self.mode = Mode::Chatting,
        }
        Ok(self.prompt())
    }
}
