//! Core engine types: positions, tiles, RNG, configuration, errors.
//!
//! These are the leaf building blocks. Grids and the game manager are built
//! on top of them and never reach into presentation or storage.

pub mod position;
pub mod tile;
pub mod rng;
pub mod config;
pub mod error;

pub use position::{Direction, Position, Side, Vector};
pub use tile::{can_merge, Tile, MAX_TILE_VALUE};
pub use rng::GameRng;
pub use config::{GameConfig, GameOverPolicy};
pub use error::{CommandError, SnapshotError};
