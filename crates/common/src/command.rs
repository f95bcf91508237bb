use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three actions a user can trigger.
///
/// Every embodiment (window buttons, key presses, CLI scripts) produces
/// commands; the kernel consumes them and never sees raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Add one to the count.
    Increment,
    /// Subtract one from the count.
    Decrement,
    /// Set the count back to zero.
    Reset,
}

impl Command {
    /// All commands, in the order their controls appear on the page.
    pub const ALL: [Command; 3] = [Command::Decrement, Command::Reset, Command::Increment];

    /// Canonical lowercase name, also accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from parsing a command token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?} (expected increment, decrement or reset)")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(ParseCommandError::Empty);
        }
        match token.to_ascii_lowercase().as_str() {
            "increment" | "inc" | "+" => Ok(Self::Increment),
            "decrement" | "dec" | "-" => Ok(Self::Decrement),
            "reset" | "0" => Ok(Self::Reset),
            _ => Err(ParseCommandError::Unknown(token.to_string())),
        }
    }
}
