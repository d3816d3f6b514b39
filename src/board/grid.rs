//! Square grid of optional tiles bound to one side.
//!
//! ## Storage
//!
//! Cells live in a flat `Vec<Option<Tile>>` indexed by `x * size + y`, so
//! scanning the vector front to back visits cells x-major (x outer, y
//! inner). Every scan in the grid uses that order.
//!
//! ## Ownership
//!
//! The grid owns its tiles outright. Moving a tile within the grid goes
//! through `move_tile`, which updates the tile's stored coordinates and the
//! cell array in one step so the two can never disagree.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::tile::{TileSerial, MAX_TILE_VALUE};
use crate::core::{can_merge, Direction, GameRng, Position, Side, SnapshotError, Tile};

use super::visual::VisualState;

/// Free cells of a grid. Stays on the stack for the classic 4x4 board.
pub type CellList = SmallVec<[Position; 16]>;

/// A size×size grid of tiles for one side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    side: Side,
    active: bool,
    won: bool,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(size: usize, side: Side, active: bool) -> Self {
        assert!(size > 0, "Grid size must be at least 1");

        Self {
            size,
            side,
            active,
            won: false,
            cells: vec![None; size * size],
        }
    }

    /// Rebuild a grid from its snapshot.
    ///
    /// Only value and position are restored; merge provenance, previous
    /// positions and the won flag start fresh. The matrix shape and every
    /// tile's coordinates are checked against the cell holding it.
    pub fn from_serial(side: Side, serial: &GridSerial) -> Result<Self, SnapshotError> {
        let size = serial.size;
        if size == 0 {
            return Err(SnapshotError::ZeroSize { side });
        }
        if serial.cells.len() != size {
            return Err(SnapshotError::RowCount {
                side,
                expected: size,
                found: serial.cells.len(),
            });
        }

        // Check the whole matrix before allocating cells for it.
        for (x, column) in serial.cells.iter().enumerate() {
            if column.len() != size {
                return Err(SnapshotError::ColumnCount {
                    side,
                    x,
                    expected: size,
                    found: column.len(),
                });
            }

            for (y, cell) in column.iter().enumerate() {
                let Some(tile) = cell else { continue };
                let at = Position::new(x as i32, y as i32, side);

                if tile.position != at {
                    return Err(SnapshotError::TilePosition {
                        cell: at,
                        found: tile.position,
                    });
                }
                if tile.value < 2 || tile.value > MAX_TILE_VALUE || !tile.value.is_power_of_two() {
                    return Err(SnapshotError::TileValue {
                        cell: at,
                        value: tile.value,
                    });
                }
            }
        }

        let mut grid = Self::new(size, side, serial.active);
        for tile in serial.cells.iter().flatten().flatten() {
            grid.insert_tile(Tile::from(tile));
        }

        Ok(grid)
    }

    /// Edge length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side this grid is bound to.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    // === Active Flag ===

    /// Whether this grid responds to slide and transfer commands.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Toggle the active flag. Cells are untouched.
    pub(crate) fn flip_active(&mut self) -> VisualState {
        self.active = !self.active;
        self.visual_state()
    }

    /// Current visual state.
    #[must_use]
    pub fn visual_state(&self) -> VisualState {
        VisualState {
            target: self.side,
            active: self.active,
        }
    }

    // === Won Flag ===

    /// Whether a winning merge has happened on this grid.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Record a winning merge on this grid.
    pub fn mark_won(&mut self) {
        self.won = true;
    }

    // === Cell Queries ===

    /// Whether `position` lies on this grid: `0 <= x, y < size`.
    ///
    /// The side is not compared; callers address cells by coordinate.
    #[must_use]
    pub fn within_bounds(&self, position: Position) -> bool {
        let size = self.size as i32;
        position.x >= 0 && position.x < size && position.y >= 0 && position.y < size
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.within_bounds(position)
            .then(|| position.x as usize * self.size + position.y as usize)
    }

    fn position_of(&self, index: usize) -> Position {
        Position::new((index / self.size) as i32, (index % self.size) as i32, self.side)
    }

    /// Tile at `position`, or `None` if the cell is empty or off the grid.
    #[must_use]
    pub fn cell_content(&self, position: Position) -> Option<&Tile> {
        self.index(position).and_then(|i| self.cells[i].as_ref())
    }

    /// Whether `position` holds no tile. Off-grid positions count as available.
    #[must_use]
    pub fn cell_available(&self, position: Position) -> bool {
        !self.cell_occupied(position)
    }

    /// Whether `position` holds a tile.
    #[must_use]
    pub fn cell_occupied(&self, position: Position) -> bool {
        self.cell_content(position).is_some()
    }

    /// Empty cells in scan order.
    #[must_use]
    pub fn available_cells(&self) -> CellList {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| self.position_of(i))
            .collect()
    }

    /// Whether any cell is empty.
    #[must_use]
    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// A uniformly random empty cell, or `None` if the grid is full.
    pub fn random_available_cell(&self, rng: &mut GameRng) -> Option<Position> {
        rng.choose(&self.available_cells()).copied()
    }

    /// Occupied cells in scan order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    /// Occupied cells in scan order, mutably. Coordinates must not change.
    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten()
    }

    /// Start-of-turn bookkeeping for every tile (see `Tile::prepare`).
    pub fn prepare_tiles(&mut self) {
        self.tiles_mut().for_each(Tile::prepare);
    }

    /// Number of tiles on the grid.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    // === Mutation ===

    /// Store `tile` at its own coordinates.
    ///
    /// Returns the tile previously in that cell. A tile whose coordinates
    /// are off the grid is handed straight back.
    pub fn insert_tile(&mut self, tile: Tile) -> Option<Tile> {
        debug_assert_eq!(tile.side, self.side, "tile inserted on the wrong side");

        match self.index(tile.position()) {
            Some(i) => self.cells[i].replace(tile),
            None => Some(tile),
        }
    }

    /// Take the tile out of `position`.
    pub fn remove_tile(&mut self, position: Position) -> Option<Tile> {
        self.index(position).and_then(|i| self.cells[i].take())
    }

    /// Move the tile at `from` to the empty cell `to`, updating its stored
    /// position. Returns false if `from` was empty or either cell is off the grid.
    pub fn move_tile(&mut self, from: Position, to: Position) -> bool {
        let (Some(src), Some(dst)) = (self.index(from), self.index(to)) else {
            return false;
        };
        if src == dst {
            return false;
        }
        debug_assert!(self.cells[dst].is_none(), "move_tile target {to} is occupied");

        let Some(mut tile) = self.cells[src].take() else {
            return false;
        };
        tile.update_position(self.position_of(dst));
        self.cells[dst] = Some(tile);
        true
    }

    /// Move the tile at `position` to the same `(x, y)` on `other`, which
    /// must be empty there. The tile's side changes to `other`'s side.
    pub fn transfer_tile(&mut self, other: &mut Grid, position: Position) -> bool {
        let target = position.on_side(other.side);
        if other.cell_occupied(target) || !other.within_bounds(target) {
            return false;
        }
        let Some(mut tile) = self.remove_tile(position) else {
            return false;
        };
        tile.update_position(target);
        other.insert_tile(tile);
        true
    }

    // === Move Detection ===

    /// Whether two orthogonally adjacent tiles share a value.
    #[must_use]
    pub fn tile_matches_available(&self) -> bool {
        self.tiles().any(|tile| {
            Direction::ALL.iter().any(|dir| {
                self.cell_content(tile.position().step(dir.vector()))
                    .is_some_and(|other| can_merge(other.value, tile.value))
            })
        })
    }

    /// Whether a slide could still change this grid.
    #[must_use]
    pub fn moves_available(&self) -> bool {
        self.cells_available() || self.tile_matches_available()
    }

    // === Serialization ===

    /// Snapshot form: `{size, cells: [x][y], active}`.
    #[must_use]
    pub fn serialize(&self) -> GridSerial {
        let cells = self
            .cells
            .chunks(self.size)
            .map(|column| column.iter().map(|c| c.as_ref().map(Tile::serialize)).collect())
            .collect();

        GridSerial {
            size: self.size,
            cells,
            active: self.active,
        }
    }
}

/// Serialized grid: `{size, cells, active}` with `cells[x][y]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSerial {
    pub size: usize,
    pub cells: Vec<Vec<Option<TileSerial>>>,
    pub active: bool,
}
