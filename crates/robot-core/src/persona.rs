use crate::{Result, RobotError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Who the robot says it is. Loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_backstory")]
    pub backstory: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_name() -> String {
    "AlphaMini".to_string()
}

fn default_backstory() -> String {
    "No backstory provided".to_string()
}

fn default_role() -> String {
    "assistant".to_string()
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: default_name(),
            backstory: default_backstory(),
            role: default_role(),
        }
    }
}

impl Persona {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| RobotError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&raw).map_err(|e| match e {
            RobotError::Config { reason, .. } => RobotError::Config {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| RobotError::Config {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Seed for the conversation's system message.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are an {}. Your name is {}. {}",
            self.role, self.name, self.backstory
        )
    }
}
