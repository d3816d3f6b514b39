//! Grids and slide geometry.
//!
//! - `grid`: the tile matrix for one side, its queries and snapshots
//! - `traversal`: slide visiting order and farthest-free-cell search
//! - `visual`: presentation state emitted when a grid's active flag flips

pub mod grid;
pub mod traversal;
pub mod visual;

pub use grid::{CellList, Grid, GridSerial};
pub use traversal::{find_farthest_position, FarthestPosition, Traversals};
pub use visual::VisualState;
