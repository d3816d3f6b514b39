//! Game configuration.
//!
//! Everything the rules treat as a tunable constant lives here: grid size,
//! start tiles, the two win thresholds, spawn odds, the game-over policy
//! and the RNG seed.

use serde::{Deserialize, Serialize};

/// Which grids decide whether any move is left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverPolicy {
    /// Only the left grid is inspected, whichever grid is active.
    #[default]
    LeftGrid,
    /// Only the currently active grid is inspected.
    ActiveGrid,
    /// Game over only once neither grid has a move.
    BothExhausted,
    /// Game over as soon as either grid runs out of moves.
    EitherExhausted,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Edge length of each (square) grid.
    pub size: usize,

    /// Tiles spawned on each grid when a fresh game starts.
    pub start_tiles: usize,

    /// Merge value that marks a grid won on a directional slide.
    pub slide_win_value: u32,

    /// Merge value that marks a grid won on a cross-grid transfer.
    pub transfer_win_value: u32,

    /// Probability that a spawned tile is a 2 (otherwise a 4).
    pub spawn_two_probability: f64,

    /// Game-over rule for the dual grid.
    pub game_over_policy: GameOverPolicy,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 4,
            start_tiles: 2,
            slide_win_value: 2048,
            transfer_win_value: 32,
            spawn_two_probability: 0.9,
            game_over_policy: GameOverPolicy::LeftGrid,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a default configuration for grids of the given size.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "Grid size must be at least 1");
        Self {
            size,
            ..Self::default()
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of start tiles per grid.
    #[must_use]
    pub fn with_start_tiles(mut self, count: usize) -> Self {
        self.start_tiles = count;
        self
    }

    /// Set the slide-path win threshold.
    #[must_use]
    pub fn with_slide_win_value(mut self, value: u32) -> Self {
        self.slide_win_value = value;
        self
    }

    /// Set the transfer-path win threshold.
    #[must_use]
    pub fn with_transfer_win_value(mut self, value: u32) -> Self {
        self.transfer_win_value = value;
        self
    }

    /// Set the probability of spawning a 2.
    #[must_use]
    pub fn with_spawn_two_probability(mut self, probability: f64) -> Self {
        self.spawn_two_probability = probability;
        self
    }

    /// Set the game-over policy.
    #[must_use]
    pub fn with_game_over_policy(mut self, policy: GameOverPolicy) -> Self {
        self.game_over_policy = policy;
        self
    }
}
