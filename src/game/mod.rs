//! Game orchestration.
//!
//! `GameManager` owns both grids and interprets `Command`s from the input
//! source. Each slide or transfer reports a `TurnOutcome`.

pub mod command;
pub mod manager;
pub mod outcome;

pub use command::Command;
pub use manager::GameManager;
pub use outcome::TurnOutcome;
