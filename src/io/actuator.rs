//! Rendering collaborator.

use serde::{Deserialize, Serialize};

use crate::board::{Grid, VisualState};
use crate::core::Side;

/// Per-render summary passed alongside the grids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub score: u64,
    pub over: bool,
    pub won: bool,
    pub best_score: u64,
    pub terminated: bool,
}

/// Receives every state change the game manager makes.
///
/// Grids are lent read-only.
pub trait Actuator {
    /// Render both grids.
    fn actuate(&mut self, left: &Grid, right: &Grid, metadata: &Metadata);

    /// Clear any win or loss banner.
    fn continue_game(&mut self);

    /// Apply a grid's presentation classes after its active flag changed.
    fn apply_classes(&mut self, state: &VisualState);
}

/// Actuator that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullActuator;

impl Actuator for NullActuator {
    fn actuate(&mut self, _left: &Grid, _right: &Grid, _metadata: &Metadata) {}

    fn continue_game(&mut self) {}

    fn apply_classes(&mut self, _state: &VisualState) {}
}

/// Actuator that keeps a record of what it was asked to do.
#[derive(Clone, Debug, Default)]
pub struct RecordingActuator {
    /// Number of `actuate` calls.
    pub actuations: usize,
    /// Number of `continue_game` calls.
    pub continues: usize,
    /// Metadata from the most recent `actuate`.
    pub last: Option<Metadata>,
    /// Tile count per side from the most recent `actuate`.
    pub last_tile_counts: [usize; 2],
    /// Every class change, in order.
    pub classes: Vec<(Side, Vec<&'static str>)>,
}

impl RecordingActuator {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Actuator for RecordingActuator {
    fn actuate(&mut self, left: &Grid, right: &Grid, metadata: &Metadata) {
        self.actuations += 1;
        self.last = Some(*metadata);
        self.last_tile_counts = [left.tile_count(), right.tile_count()];
    }

    fn continue_game(&mut self) {
        self.continues += 1;
    }

    fn apply_classes(&mut self, state: &VisualState) {
        self.classes.push((state.target, state.classes()));
    }
}
