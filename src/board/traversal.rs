//! Slide traversal order and the farthest-free-cell search.

use smallvec::SmallVec;

use crate::core::{Position, Side, Vector};

use super::grid::Grid;

/// Coordinate order for one slide.
///
/// Both orders ascend, except that an order is reversed when its vector
/// component is +1. Tiles nearest the edge being slid towards are visited
/// first, so a tile never lands on a cell another tile has yet to leave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traversals {
    pub x: SmallVec<[i32; 8]>,
    pub y: SmallVec<[i32; 8]>,
}

impl Traversals {
    /// Build the traversal order for a grid of `size` and a slide `vector`.
    #[must_use]
    pub fn build(size: usize, vector: Vector) -> Self {
        let mut x: SmallVec<[i32; 8]> = (0..size as i32).collect();
        let mut y = x.clone();

        if vector.x == 1 {
            x.reverse();
        }
        if vector.y == 1 {
            y.reverse();
        }

        Self { x, y }
    }

    /// Every cell on `side`, x-major in traversal order.
    pub fn cells(&self, side: Side) -> impl Iterator<Item = Position> + '_ {
        self.x
            .iter()
            .flat_map(move |&x| self.y.iter().map(move |&y| Position::new(x, y, side)))
    }
}

/// Result of `find_farthest_position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FarthestPosition {
    /// Last empty cell reached (the starting cell if none).
    pub farthest: Position,
    /// First cell past `farthest`: occupied or off the grid.
    pub next: Position,
}

/// Step from `cell` along `vector` while the next cell is on the grid and
/// empty.
#[must_use]
pub fn find_farthest_position(grid: &Grid, cell: Position, vector: Vector) -> FarthestPosition {
    let mut previous = cell;
    let mut next = cell.step(vector);

    while grid.within_bounds(next) && grid.cell_available(next) {
        previous = next;
        next = next.step(vector);
    }

    FarthestPosition {
        farthest: previous,
        next,
    }
}
