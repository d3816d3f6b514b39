//! # flip-2048
//!
//! Rules engine for a 2048-style tile-merging puzzle played on two mirrored
//! grids.
//!
//! ## Rules
//!
//! 1. **Slide**: the active grid slides in one of four directions. Equal
//!    tiles that meet merge into their sum, at most once per tile per turn.
//!
//! 2. **Flip**: the other grid becomes active. Exactly one grid is active
//!    at any time.
//!
//! 3. **Transfer** (the `merge` command): every tile of the active grid
//!    moves to the same cell of the other grid, merging with an equal tile
//!    already there.
//!
//! After every turn that moved something, one tile (2 or 4) spawns on the
//! grid that moved. The game is won once both grids have produced a winning
//! tile; it is lost once the configured game-over policy finds no move.
//!
//! ## Architecture
//!
//! - **Pure core**: input, rendering and persistence are collaborator
//!   traits (`StorageManager`, `Actuator`). The engine runs headless.
//!
//! - **Deterministic**: all randomness flows through a seedable `GameRng`.
//!
//! ## Modules
//!
//! - `core`: positions, directions, tiles, RNG, configuration, errors
//! - `board`: grids, traversal order, farthest-cell search, visual state
//! - `snapshot`: persisted game state and its validation
//! - `io`: storage and actuator contracts with in-memory implementations
//! - `game`: the game manager, commands and turn outcomes
//!
//! ## Example
//!
//! ```
//! use flip_2048::{Command, Direction, GameConfig, GameManager, MemoryStorage, NullActuator};
//!
//! let mut game = GameManager::new(GameConfig::default().with_seed(1), MemoryStorage::new(), NullActuator);
//! game.handle(Command::Move(Direction::Left));
//! game.handle(Command::Flip);
//! game.handle(Command::Merge);
//!
//! assert!(!game.is_over());
//! ```

pub mod core;
pub mod board;
pub mod snapshot;
pub mod io;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Direction, Position, Side, Vector,
    Tile, GameRng,
    GameConfig, GameOverPolicy,
    CommandError, SnapshotError,
};

pub use crate::board::{Grid, GridSerial, Traversals, VisualState};

pub use crate::snapshot::{SavedState, TileSerial};

pub use crate::io::{
    Actuator, Metadata, NullActuator, RecordingActuator,
    MemoryStorage, StorageManager,
};

pub use crate::game::{Command, GameManager, TurnOutcome};
