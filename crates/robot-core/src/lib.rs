//! Command interpretation for the AlphaMini robot
//!
//! Typed operator commands are matched against a keyword catalog, acknowledged out loud and
//! turned into hardware actions (face servo, wheels, torso, camera, music) or into a chat
//! session with a local language model. All hardware and services are reached through the
//! [`Hardware`] facade so the whole loop runs against simulated devices in tests.

mod error;
pub use error::{Result, RobotError};

mod normalize;
pub use normalize::TextNormalizer;

mod persona;
pub use persona::Persona;

mod tables;
pub use tables::{
    BodyStep, Direction, Expression, Track, WheelSpeeds, BODY_SEQUENCE, DRIVE_ROTATIONS,
};

mod settings;
pub use settings::{RobotSettings, Timings};

mod hardware;
pub use hardware::{Console, Hardware, StdoutConsole};

pub mod actions;

mod catalog;
pub use catalog::{Catalog, Command, CommandEntry};

mod session;
pub use session::{is_sentinel, Conversation, SessionState, FAREWELL};

mod dispatcher;
pub use dispatcher::{Dispatcher, Outcome, Prompt, QUIT_SENTINEL, UNRECOGNIZED};

pub mod sim;
