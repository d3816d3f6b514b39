//! Tiles: valued, positioned game pieces.
//!
//! A tile records where it sits and, for the current turn only, where it
//! sat before and which two tiles merged to create it. Both are animation
//! hints; the rules never read `previous_position`.

use serde::{Deserialize, Serialize};

use super::position::{Position, Side};

/// Value given to a tile when none is specified.
pub const DEFAULT_TILE_VALUE: u32 = 2;

/// Largest tile value. Two tiles merge only if the result stays at or
/// below it, so doubling never overflows `u32`.
pub const MAX_TILE_VALUE: u32 = 1 << 30;

/// Whether tiles of value `a` and `b` may merge.
#[must_use]
pub const fn can_merge(a: u32, b: u32) -> bool {
    a == b && a <= MAX_TILE_VALUE / 2
}

/// A single tile.
///
/// The stored `(x, y, side)` must match the grid cell holding the tile.
/// `Tile::update_position` changes only the tile; keeping the grid in sync
/// is the grid's job (see `Grid::move_tile`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub side: Side,
    pub value: u32,

    /// Position at the start of the current turn.
    pub previous_position: Option<Position>,

    /// The two tiles merged into this one this turn (moving, then target).
    pub merged_from: Option<Box<[Tile; 2]>>,
}

impl Tile {
    /// Create a tile with no history.
    #[must_use]
    pub fn new(position: Position, value: u32) -> Self {
        Self {
            x: position.x,
            y: position.y,
            side: position.side,
            value,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Create a tile with the default value.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self::new(position, DEFAULT_TILE_VALUE)
    }

    /// Create the tile produced by merging `moving` into `target`.
    ///
    /// The result sits at `position` with double the moving tile's value.
    /// Callers check `can_merge` first.
    #[must_use]
    pub fn merged(position: Position, moving: Tile, target: Tile) -> Self {
        let mut tile = Self::new(position, moving.value * 2);
        tile.merged_from = Some(Box::new([moving, target]));
        tile
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.side)
    }

    /// Snapshot the current position into `previous_position`.
    pub fn save_position(&mut self) {
        self.previous_position = Some(self.position());
    }

    /// Overwrite the stored position.
    pub fn update_position(&mut self, position: Position) {
        self.x = position.x;
        self.y = position.y;
        self.side = position.side;
    }

    /// Start-of-turn bookkeeping: save the position and drop merge provenance.
    pub fn prepare(&mut self) {
        self.merged_from = None;
        self.save_position();
    }

    /// Whether this tile was created by a merge this turn.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }

    /// Snapshot form: position and value only.
    #[must_use]
    pub fn serialize(&self) -> TileSerial {
        TileSerial {
            position: self.position(),
            value: self.value,
        }
    }
}

/// Serialized tile: `{position: {x, y, side}, value}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSerial {
    pub position: Position,
    pub value: u32,
}

impl From<&TileSerial> for Tile {
    fn from(serial: &TileSerial) -> Self {
        Tile::new(serial.position, serial.value)
    }
}
