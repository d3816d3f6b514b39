//! Commands the input source can issue.

use serde::{Deserialize, Serialize};

use crate::core::{CommandError, Direction};

/// One player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Slide the active grid.
    Move(Direction),
    /// Throw the game away and start fresh.
    Restart,
    /// Continue after a win.
    KeepPlaying,
    /// Swap which grid is active.
    Flip,
    /// Transfer the active grid's tiles into the other grid.
    Merge,
}

impl Command {
    /// Decode a named input event.
    ///
    /// `"move"` needs a direction (0-3); the other events ignore it.
    ///
    /// ```
    /// use flip_2048::core::Direction;
    /// use flip_2048::game::Command;
    ///
    /// assert_eq!(Command::from_event("move", Some(3)), Ok(Command::Move(Direction::Left)));
    /// assert_eq!(Command::from_event("flip", None), Ok(Command::Flip));
    /// assert!(Command::from_event("move", None).is_err());
    /// ```
    pub fn from_event(name: &str, direction: Option<u8>) -> Result<Self, CommandError> {
        match name {
            "move" => {
                let raw = direction.ok_or(CommandError::MissingDirection)?;
                Ok(Command::Move(Direction::try_from(raw)?))
            }
            "restart" => Ok(Command::Restart),
            "keepPlaying" => Ok(Command::KeepPlaying),
            "flip" => Ok(Command::Flip),
            "merge" => Ok(Command::Merge),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// Whether this command is refused once the game is terminated.
    #[must_use]
    pub fn blocked_when_terminated(self) -> bool {
        !matches!(self, Command::Restart | Command::KeepPlaying)
    }
}
