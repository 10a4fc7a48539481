//! Abstract input commands.
//!
//! An external input mapper turns key presses into `Command`s. Engines only
//! interpret the subset relevant to their rules and current state; anything
//! else is a no-op.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ArcadeError;

/// Input command shared by every engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Rotate,
    HardDrop,
    TogglePause,
    /// Enter.
    Confirm,
    /// Escape.
    Cancel,
}

impl Command {
    /// All commands, in declaration order.
    pub const ALL: [Command; 9] = [
        Command::MoveUp,
        Command::MoveDown,
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::HardDrop,
        Command::TogglePause,
        Command::Confirm,
        Command::Cancel,
    ];

    /// True for the four directional commands.
    #[must_use]
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Command::MoveUp | Command::MoveDown | Command::MoveLeft | Command::MoveRight
        )
    }

    /// Unit step `(dx, dy)` for directional commands (`y` grows downward).
    #[must_use]
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Command::MoveUp => Some((0, -1)),
            Command::MoveDown => Some((0, 1)),
            Command::MoveLeft => Some((-1, 0)),
            Command::MoveRight => Some((1, 0)),
            _ => None,
        }
    }

    /// Name used in key-map files and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Command::MoveUp => "move_up",
            Command::MoveDown => "move_down",
            Command::MoveLeft => "move_left",
            Command::MoveRight => "move_right",
            Command::Rotate => "rotate",
            Command::HardDrop => "hard_drop",
            Command::TogglePause => "toggle_pause",
            Command::Confirm => "confirm",
            Command::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = ArcadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| ArcadeError::UnknownCommand(s.to_string()))
    }
}
