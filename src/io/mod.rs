//! Collaborator contracts the game manager drives.
//!
//! - `StorageManager`: snapshot and best-score persistence
//! - `Actuator`: rendering and presentation-class changes
//!
//! Real browsers, terminals or databases live outside this crate. The
//! in-memory and recording implementations here are enough to run the
//! engine headless.

pub mod actuator;
pub mod storage;

pub use actuator::{Actuator, Metadata, NullActuator, RecordingActuator};
pub use storage::{MemoryStorage, StorageManager, BEST_SCORE_KEY, GAME_STATE_KEY};
