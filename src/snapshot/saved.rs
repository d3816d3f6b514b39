//! Whole-game snapshots and their validation.
//!
//! `SavedState` is what storage holds. `restore` turns it back into grids,
//! rejecting states the rules could not have produced.

use serde::{Deserialize, Serialize};

use crate::board::{Grid, GridSerial};
use crate::core::{Side, SnapshotError};

/// Whole-game snapshot handed to the storage collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    /// Left grid.
    pub grid: GridSerial,
    pub right_grid: GridSerial,
    pub score: u64,
    pub over: bool,
    pub won: bool,
    pub keep_playing: bool,
}

/// Grids and active side rebuilt from a validated snapshot.
#[derive(Clone, Debug)]
pub struct RestoredGame {
    pub left: Grid,
    pub right: Grid,
    pub active: Side,
}

impl SavedState {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON. The result is not validated; see `restore`.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild both grids, rejecting anything the rules could not have
    /// produced: bad matrix shapes, mismatched sizes, tiles whose stored
    /// coordinates disagree with their cell, and active flags that do not
    /// name exactly one grid.
    pub fn restore(&self) -> Result<RestoredGame, SnapshotError> {
        let left = Grid::from_serial(Side::Left, &self.grid)?;
        let right = Grid::from_serial(Side::Right, &self.right_grid)?;

        if left.size() != right.size() {
            return Err(SnapshotError::SizeMismatch {
                left: left.size(),
                right: right.size(),
            });
        }

        let active = match (left.is_active(), right.is_active()) {
            (true, false) => Side::Left,
            (false, true) => Side::Right,
            (l, r) => return Err(SnapshotError::ActiveFlags { left: l, right: r }),
        };

        Ok(RestoredGame { left, right, active })
    }

    /// Check the snapshot without keeping the rebuilt grids.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.restore().map(|_| ())
    }
}
