//! Persisted game snapshots.
//!
//! ## Format
//!
//! ```text
//! SavedState = {grid, rightGrid, score, over, won, keepPlaying}
//! GridSerial = {size, cells: size×size of (TileSerial | null), active}
//! TileSerial = {position: {x, y, side}, value}
//! ```
//!
//! Snapshots carry tile values and positions only. Merge provenance and
//! previous positions are turn-local animation hints and are not kept.

mod saved;

pub use saved::{RestoredGame, SavedState};

pub use crate::board::GridSerial;
pub use crate::core::tile::TileSerial;
