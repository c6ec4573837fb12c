//! Fixed expression, movement and track tables

use crate::RobotError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    Happy,
    Sad,
    Kiss,
}

impl Expression {
    pub const ALL: [Expression; 3] = [Expression::Happy, Expression::Sad, Expression::Kiss];

    /// Face servo angle in degrees.
    pub fn angle(self) -> f32 {
        match self {
            Expression::Happy => 0.0,
            Expression::Sad => 90.0,
            Expression::Kiss => -80.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Expression::Happy => "happy",
            Expression::Sad => "sad",
            Expression::Kiss => "kiss",
        }
    }
}

impl FromStr for Expression {
    type Err = RobotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| RobotError::UnknownName {
                kind: "expression",
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelSpeeds {
    pub left: i32,
    pub right: i32,
}

/// Rotations per drive command.
pub const DRIVE_ROTATIONS: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    /// Combined torso and base twist.
    Body,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
        Direction::Body,
    ];

    /// Wheel speeds for plain drive directions; `None` for the composite body move.
    pub fn wheel_speeds(self) -> Option<WheelSpeeds> {
        let (left, right) = match self {
            Direction::Forward => (15, -15),
            Direction::Backward => (-15, 15),
            Direction::Left => (-20, -20),
            Direction::Right => (20, 20),
            Direction::Body => return None,
        };
        Some(WheelSpeeds { left, right })
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Body => "body",
        }
    }
}

impl FromStr for Direction {
    type Err = RobotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| RobotError::UnknownName {
                kind: "direction",
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyStep {
    /// Torso motor move, issued without waiting.
    Torso { rotations: f32, speed: i32 },
    Wheels { rotations: f32, speeds: WheelSpeeds },
}

/// Twist the torso one way while the base turns, then undo both.
pub const BODY_SEQUENCE: [BodyStep; 4] = [
    BodyStep::Torso {
        rotations: 0.25,
        speed: 10,
    },
    BodyStep::Wheels {
        rotations: 4.0,
        speeds: WheelSpeeds {
            left: 12,
            right: -12,
        },
    },
    BodyStep::Torso {
        rotations: 0.25,
        speed: -10,
    },
    BodyStep::Wheels {
        rotations: 4.0,
        speeds: WheelSpeeds {
            left: -12,
            right: 12,
        },
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Track {
    Macarena,
    KongFu,
    Apt,
}

impl Track {
    /// Map the operator's menu choice (`1`, `2` or `3`) to a track.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector {
            "1" => Some(Track::Macarena),
            "2" => Some(Track::KongFu),
            "3" => Some(Track::Apt),
            _ => None,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Track::Macarena => "Macarena.mp3",
            Track::KongFu => "kongfu.mp3",
            Track::Apt => "Voicy_apt.mp3",
        }
    }
}
