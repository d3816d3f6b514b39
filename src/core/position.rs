//! Cell addressing: sides, positions, and movement directions.
//!
//! ## Coordinates
//!
//! A `Position` is `(x, y)` plus the `Side` of the grid it belongs to.
//! Coordinates are signed so a directional scan can step one cell past the
//! edge; grids treat such positions as "no tile" rather than an error.
//!
//! ```
//! use flip_2048::core::{Direction, Position, Side};
//!
//! let cell = Position::new(0, 3, Side::Left);
//! let above = cell.step(Direction::Up.vector());
//! assert_eq!(above, Position::new(0, 2, Side::Left));
//!
//! // Stepping off the edge is allowed; bounds are the grid's concern.
//! let off = Position::new(0, 0, Side::Left).step(Direction::Left.vector());
//! assert_eq!(off.x, -1);
//! ```

use serde::{Deserialize, Serialize};

use super::error::CommandError;

/// Which of the two grids a cell or tile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The primary grid. Game-over checks look here by default.
    Left,
    /// The mirrored grid. Starts inactive on a fresh game.
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// The other grid's side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Lowercase name, as used in snapshots and presentation classes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell address on one of the two grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
    /// Grid the cell belongs to.
    pub side: Side,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32, side: Side) -> Self {
        Self { x, y, side }
    }

    /// Position one step along `vector`, on the same side.
    #[must_use]
    pub const fn step(self, vector: Vector) -> Self {
        Self {
            x: self.x + vector.x,
            y: self.y + vector.y,
            side: self.side,
        }
    }

    /// Same `(x, y)` on another side.
    #[must_use]
    pub const fn on_side(self, side: Side) -> Self {
        Self { x: self.x, y: self.y, side }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, {})", self.side, self.x, self.y)
    }
}

/// Unit step for a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

/// A sliding direction.
///
/// The discriminants are the integers the input source emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All four directions in wire order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Fixed lookup from direction to unit vector.
    #[must_use]
    pub const fn vector(self) -> Vector {
        match self {
            Direction::Up => Vector { x: 0, y: -1 },
            Direction::Right => Vector { x: 1, y: 0 },
            Direction::Down => Vector { x: 0, y: 1 },
            Direction::Left => Vector { x: -1, y: 0 },
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Down),
            3 => Ok(Direction::Left),
            other => Err(CommandError::InvalidDirection(other)),
        }
    }
}
