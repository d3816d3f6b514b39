//! The game manager: turn orchestration over both grids.
//!
//! ## Turn Flow
//!
//! 1. Refuse the command if the game is terminated (restart and
//!    keep-playing excepted).
//! 2. Prepare every tile: save its position, drop last turn's merge
//!    provenance.
//! 3. Slide (within the active grid) or transfer (active grid into the
//!    other one), merging equal tiles at most once per tile per turn.
//! 4. If anything moved: spawn one tile, re-check game over, actuate.
//!
//! Actuating persists a snapshot through the storage collaborator and hands
//! both grids to the actuator.

use tracing::{debug, info, warn};

use crate::board::{find_farthest_position, FarthestPosition, Grid, Traversals};
use crate::core::{
    can_merge, Direction, GameConfig, GameOverPolicy, GameRng, Position, Side, Tile,
};
use crate::io::{Actuator, Metadata, MemoryStorage, NullActuator, StorageManager};
use crate::snapshot::{RestoredGame, SavedState};

use super::command::Command;
use super::outcome::TurnOutcome;

/// Owns both grids and drives every command against them.
///
/// Generic over its storage and actuator so callers keep typed access to
/// them (`storage()`, `actuator()`).
pub struct GameManager<S: StorageManager = MemoryStorage, A: Actuator = NullActuator> {
    config: GameConfig,
    storage: S,
    actuator: A,
    rng: GameRng,

    left: Grid,
    right: Grid,
    /// Single source of truth for which grid takes turns. The grids'
    /// own flags mirror it.
    active: Side,

    score: u64,
    over: bool,
    won: bool,
    keep_playing: bool,
}

impl<S: StorageManager, A: Actuator> GameManager<S, A> {
    /// Create a game, restoring from storage when a valid snapshot exists.
    ///
    /// The RNG is seeded from `config.seed`, or from entropy if unset.
    pub fn new(config: GameConfig, storage: S, actuator: A) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::with_rng(config, storage, actuator, rng)
    }

    /// Create a game with an explicit random source.
    pub fn with_rng(config: GameConfig, storage: S, actuator: A, rng: GameRng) -> Self {
        assert!(config.size > 0, "Grid size must be at least 1");

        let mut game = Self {
            left: Grid::new(config.size, Side::Left, true),
            right: Grid::new(config.size, Side::Right, false),
            active: Side::Left,
            config,
            storage,
            actuator,
            rng,
            score: 0,
            over: false,
            won: false,
            keep_playing: false,
        };
        game.setup();
        game
    }

    // === Setup ===

    fn setup(&mut self) {
        if let Some(saved) = self.storage.game_state() {
            match saved.restore() {
                Ok(restored) => {
                    self.load(&saved, restored);
                    info!(score = self.score, active = %self.active, "restored saved game");
                    self.actuate();
                    return;
                }
                Err(err) => {
                    warn!(%err, "discarding invalid saved game");
                    self.storage.clear_game_state();
                }
            }
        }

        self.start_fresh();
        info!(size = self.config.size, "started new game");
        self.actuate();
    }

    fn load(&mut self, saved: &SavedState, restored: RestoredGame) {
        self.left = restored.left;
        self.right = restored.right;
        self.active = restored.active;
        self.score = saved.score;
        self.over = saved.over;
        self.won = saved.won;
        self.keep_playing = saved.keep_playing;
    }

    fn start_fresh(&mut self) {
        let size = self.config.size;
        self.left = Grid::new(size, Side::Left, true);
        self.right = Grid::new(size, Side::Right, false);
        self.active = Side::Left;
        self.score = 0;
        self.over = false;
        self.won = false;
        self.keep_playing = false;

        let p = self.config.spawn_two_probability;
        for _ in 0..self.config.start_tiles {
            spawn_tile(&mut self.left, &mut self.rng, p);
        }
        for _ in 0..self.config.start_tiles {
            spawn_tile(&mut self.right, &mut self.rng, p);
        }
    }

    // === Accessors ===

    /// Game configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Grid edge length (taken from the grids, which a restore may set).
    #[must_use]
    pub fn size(&self) -> usize {
        self.left.size()
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.storage.best_score()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn is_keep_playing(&self) -> bool {
        self.keep_playing
    }

    /// Side of the grid that takes turns.
    #[must_use]
    pub fn active_side(&self) -> Side {
        self.active
    }

    /// Grid for `side`.
    #[must_use]
    pub fn grid(&self, side: Side) -> &Grid {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    #[must_use]
    pub fn left_grid(&self) -> &Grid {
        &self.left
    }

    #[must_use]
    pub fn right_grid(&self) -> &Grid {
        &self.right
    }

    /// Storage collaborator.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Actuator collaborator.
    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Lost, or won without choosing to keep playing.
    #[must_use]
    pub fn is_game_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    // === Commands ===

    /// Dispatch one input command.
    pub fn handle(&mut self, command: Command) -> TurnOutcome {
        if command.blocked_when_terminated() && self.is_game_terminated() {
            debug!(?command, "ignored, game terminated");
            return TurnOutcome::default();
        }

        match command {
            Command::Move(direction) => self.move_tiles(direction),
            Command::Merge => self.merge(),
            Command::Flip => {
                self.flip();
                TurnOutcome::default()
            }
            Command::Restart => {
                self.restart();
                TurnOutcome::default()
            }
            Command::KeepPlaying => {
                self.keep_playing();
                TurnOutcome::default()
            }
        }
    }

    /// Clear the stored game and start over.
    pub fn restart(&mut self) {
        info!(score = self.score, "restarting");
        self.storage.clear_game_state();
        self.actuator.continue_game();
        self.setup();
    }

    /// Keep playing past a win.
    pub fn keep_playing(&mut self) {
        self.keep_playing = true;
        info!(score = self.score, "keep playing");
        self.actuator.continue_game();
    }

    /// Swap which grid is active.
    pub fn flip(&mut self) {
        if self.is_game_terminated() {
            return;
        }

        let left_state = self.left.flip_active();
        let right_state = self.right.flip_active();
        self.active = self.active.opposite();
        debug_assert!(self.grid(self.active).is_active());
        debug_assert!(!self.grid(self.active.opposite()).is_active());

        debug!(active = %self.active, "flip");
        self.actuator.apply_classes(&left_state);
        self.actuator.apply_classes(&right_state);
        self.actuate();
    }

    /// Cross-grid transfer; alias of `move_side`.
    pub fn merge(&mut self) -> TurnOutcome {
        self.move_side()
    }

    /// Slide the active grid in `direction`.
    pub fn move_tiles(&mut self, direction: Direction) -> TurnOutcome {
        if self.is_game_terminated() {
            return TurnOutcome::default();
        }

        let side = self.active;
        let vector = direction.vector();
        let traversals = Traversals::build(self.size(), vector);
        let win_value = self.config.slide_win_value;
        self.prepare_tiles();

        let grid = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        let mut outcome = TurnOutcome::default();
        let mut grid_won = false;

        for cell in traversals.cells(side) {
            let Some(value) = grid.cell_content(cell).map(|t| t.value) else {
                continue;
            };
            let FarthestPosition { farthest, next } = find_farthest_position(grid, cell, vector);

            // A tile already produced by a merge this turn takes no second merge.
            let mergeable = grid
                .cell_content(next)
                .is_some_and(|other| can_merge(other.value, value) && !other.is_merged());

            if mergeable {
                let (Some(moving), Some(target)) = (grid.remove_tile(cell), grid.remove_tile(next))
                else {
                    continue;
                };
                let merged = merge_tiles(moving, target, next);
                outcome.record_merge(merged.value);
                if merged.value == win_value {
                    grid.mark_won();
                    grid_won = true;
                }
                grid.insert_tile(merged);
            } else if grid.move_tile(cell, farthest) {
                outcome.moved = true;
            }
        }

        self.finish_turn(side, grid_won, &mut outcome);
        debug!(
            ?direction,
            moved = outcome.moved,
            merges = outcome.merges,
            score = self.score,
            "slide"
        );
        outcome
    }

    /// Transfer every tile of the active grid into the other grid's
    /// coordinate-aligned cell, merging with equal values.
    pub fn move_side(&mut self) -> TurnOutcome {
        if self.is_game_terminated() {
            return TurnOutcome::default();
        }

        let from = self.active;
        let to = from.opposite();
        let win_value = self.config.transfer_win_value;
        self.prepare_tiles();

        let (source, dest) = match from {
            Side::Left => (&mut self.left, &mut self.right),
            Side::Right => (&mut self.right, &mut self.left),
        };
        let size = source.size() as i32;
        let mut outcome = TurnOutcome::default();
        let mut grid_won = false;

        for x in 0..size {
            for y in 0..size {
                let cell = Position::new(x, y, from);
                let Some(value) = source.cell_content(cell).map(|t| t.value) else {
                    continue;
                };
                let target = cell.on_side(to);

                match dest.cell_content(target).map(|t| t.value) {
                    Some(existing) if can_merge(existing, value) => {
                        let (Some(moving), Some(target_tile)) =
                            (source.remove_tile(cell), dest.remove_tile(target))
                        else {
                            continue;
                        };
                        let merged = merge_tiles(moving, target_tile, target);
                        outcome.record_merge(merged.value);
                        if merged.value == win_value {
                            dest.mark_won();
                            grid_won = true;
                        }
                        dest.insert_tile(merged);
                    }
                    Some(_) => {}
                    None => {
                        if source.transfer_tile(dest, cell) {
                            outcome.moved = true;
                        }
                    }
                }
            }
        }

        self.finish_turn(from, grid_won, &mut outcome);
        debug!(
            %from,
            moved = outcome.moved,
            merges = outcome.merges,
            score = self.score,
            "transfer"
        );
        outcome
    }

    /// Spawn one tile for a turn taken on `side`.
    ///
    /// The right grid is used when `side` is right and the right grid is
    /// active with room; otherwise the left grid, if it is active with room.
    /// Returns where the tile landed.
    pub fn add_random_tile(&mut self, side: Side) -> Option<Position> {
        let grid = if side == Side::Right && self.right.is_active() && self.right.cells_available() {
            &mut self.right
        } else if self.left.is_active() && self.left.cells_available() {
            &mut self.left
        } else {
            return None;
        };

        spawn_tile(grid, &mut self.rng, self.config.spawn_two_probability)
    }

    /// Whether the game can continue, per `config.game_over_policy`.
    #[must_use]
    pub fn moves_available(&self) -> bool {
        match self.config.game_over_policy {
            GameOverPolicy::LeftGrid => self.left.moves_available(),
            GameOverPolicy::ActiveGrid => self.grid(self.active).moves_available(),
            GameOverPolicy::BothExhausted => {
                self.left.moves_available() || self.right.moves_available()
            }
            GameOverPolicy::EitherExhausted => {
                self.left.moves_available() && self.right.moves_available()
            }
        }
    }

    /// Snapshot for storage.
    #[must_use]
    pub fn serialize(&self) -> SavedState {
        SavedState {
            grid: self.left.serialize(),
            right_grid: self.right.serialize(),
            score: self.score,
            over: self.over,
            won: self.won,
            keep_playing: self.keep_playing,
        }
    }

    // === Turn Internals ===

    fn prepare_tiles(&mut self) {
        self.left.prepare_tiles();
        self.right.prepare_tiles();
    }

    fn finish_turn(&mut self, side: Side, grid_won: bool, outcome: &mut TurnOutcome) {
        self.score += outcome.score_delta;

        if grid_won {
            info!(%side, "grid won");
            if self.left.is_won() && self.right.is_won() && !self.won {
                self.won = true;
                info!(score = self.score, "game won");
            }
        }

        if outcome.moved {
            outcome.spawned = self.add_random_tile(side);
            if !self.moves_available() {
                self.over = true;
                info!(score = self.score, "game over");
            }
            self.actuate();
        }
    }

    fn actuate(&mut self) {
        if self.storage.best_score() < self.score {
            self.storage.set_best_score(self.score);
        }

        // A lost game is not resumable; a won one is.
        if self.over {
            self.storage.clear_game_state();
        } else {
            let state = self.serialize();
            self.storage.set_game_state(&state);
        }

        let metadata = Metadata {
            score: self.score,
            over: self.over,
            won: self.won,
            best_score: self.storage.best_score(),
            terminated: self.is_game_terminated(),
        };
        self.actuator.actuate(&self.left, &self.right, &metadata);
    }
}

/// Merge `moving` into `target` at `at`. The moving tile's stored position
/// converges on `at` before it is folded into the merged tile's provenance.
fn merge_tiles(mut moving: Tile, target: Tile, at: Position) -> Tile {
    moving.update_position(at);
    Tile::merged(at, moving, target)
}

fn spawn_tile(grid: &mut Grid, rng: &mut GameRng, two_probability: f64) -> Option<Position> {
    let value = if rng.gen_bool(two_probability) { 2 } else { 4 };
    let cell = grid.random_available_cell(rng)?;
    grid.insert_tile(Tile::new(cell, value));
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::RecordingActuator;

    fn seeded() -> GameConfig {
        GameConfig::default().with_seed(42)
    }

    fn game_with(
        config: GameConfig,
        left: &[(i32, i32, u32)],
        right: &[(i32, i32, u32)],
        active: Side,
    ) -> GameManager<MemoryStorage, RecordingActuator> {
        let mut l = Grid::new(config.size, Side::Left, active == Side::Left);
        for &(x, y, v) in left {
            l.insert_tile(Tile::new(Position::new(x, y, Side::Left), v));
        }
        let mut r = Grid::new(config.size, Side::Right, active == Side::Right);
        for &(x, y, v) in right {
            r.insert_tile(Tile::new(Position::new(x, y, Side::Right), v));
        }
        let saved = SavedState {
            grid: l.serialize(),
            right_grid: r.serialize(),
            score: 0,
            over: false,
            won: false,
            keep_playing: false,
        };
        GameManager::new(config, MemoryStorage::with_game_state(&saved), RecordingActuator::new())
    }

    #[test]
    fn test_fresh_game() {
        let game = GameManager::new(seeded(), MemoryStorage::new(), RecordingActuator::new());

        assert_eq!(game.left_grid().tile_count(), 2);
        assert_eq!(game.right_grid().tile_count(), 2);
        assert_eq!(game.active_side(), Side::Left);
        assert!(game.left_grid().is_active());
        assert!(!game.right_grid().is_active());
        assert_eq!(game.score(), 0);
        assert!(!game.is_game_terminated());
        // Setup actuates and persists.
        assert_eq!(game.actuator().actuations, 1);
        assert!(game.storage().game_state().is_some());
    }

    #[test]
    fn test_spawn_values() {
        let game = GameManager::new(
            seeded().with_spawn_two_probability(1.0),
            MemoryStorage::new(),
            NullActuator,
        );
        assert!(game.left_grid().tiles().all(|t| t.value == 2));

        let game = GameManager::new(
            seeded().with_spawn_two_probability(0.0),
            MemoryStorage::new(),
            NullActuator,
        );
        assert!(game.right_grid().tiles().all(|t| t.value == 4));
    }

    #[test]
    fn test_slide_merges_once_per_tile() {
        // 2 2 2 2 slid left gives 4 4, not 8.
        let mut game = game_with(
            seeded(),
            &[(0, 0, 2), (1, 0, 2), (2, 0, 2), (3, 0, 2)],
            &[],
            Side::Left,
        );

        let outcome = game.move_tiles(Direction::Left);

        assert_eq!(outcome.merges, 2);
        assert_eq!(outcome.score_delta, 8);
        let grid = game.left_grid();
        assert_eq!(grid.cell_content(Position::new(0, 0, Side::Left)).unwrap().value, 4);
        assert_eq!(grid.cell_content(Position::new(1, 0, Side::Left)).unwrap().value, 4);
    }

    #[test]
    fn test_merge_provenance() {
        // Spawns are always 2, so nothing can merge with the new 4.
        let config = seeded().with_spawn_two_probability(1.0);
        let mut game = game_with(config, &[(0, 0, 2), (1, 0, 2)], &[], Side::Left);
        let origin = Position::new(0, 0, Side::Left);
        game.move_tiles(Direction::Left);

        let merged = game.left_grid().cell_content(origin).unwrap();
        let sources = merged.merged_from.as_deref().unwrap();
        assert_eq!(sources[0].position(), origin);
        assert_eq!(sources[0].previous_position, Some(Position::new(1, 0, Side::Left)));
        assert_eq!(sources[1].previous_position, Some(origin));

        // The next turn clears it, even when nothing moves.
        game.move_tiles(Direction::Left);
        let tile = game.left_grid().cell_content(origin).unwrap();
        assert_eq!(tile.value, 4);
        assert!(!tile.is_merged());
        assert_eq!(tile.previous_position, Some(origin));
    }

    #[test]
    fn test_no_move_no_spawn() {
        let mut game = game_with(seeded(), &[(0, 0, 2), (0, 1, 4)], &[], Side::Left);
        let before = game.actuator().actuations;

        let outcome = game.move_tiles(Direction::Left);

        assert!(!outcome.moved);
        assert!(outcome.spawned.is_none());
        assert_eq!(game.left_grid().tile_count(), 2);
        assert_eq!(game.actuator().actuations, before);
    }

    #[test]
    fn test_add_random_tile_routing() {
        let mut game = game_with(seeded(), &[], &[], Side::Left);

        // Right requested but right inactive: falls back to the active left grid.
        let spawned = game.add_random_tile(Side::Right).unwrap();
        assert_eq!(spawned.side, Side::Left);

        game.flip();
        let spawned = game.add_random_tile(Side::Right).unwrap();
        assert_eq!(spawned.side, Side::Right);

        // Left requested while right is active: nothing spawns.
        assert!(game.add_random_tile(Side::Left).is_none());
    }

    #[test]
    fn test_flip_emits_classes() {
        let mut game = game_with(seeded(), &[(0, 0, 2)], &[], Side::Left);
        game.flip();

        assert_eq!(game.active_side(), Side::Right);
        assert_eq!(
            game.actuator().classes,
            vec![
                (Side::Left, vec!["grid-container", "left-grid-container", "inactive"]),
                (Side::Right, vec!["grid-container", "right-grid-container"]),
            ]
        );
        assert!(game.storage().game_state().unwrap().right_grid.active);
    }

    #[test]
    fn test_handle_dispatch() {
        let mut game = game_with(seeded(), &[(3, 3, 2)], &[], Side::Left);

        let outcome = game.handle(Command::Move(Direction::Up));
        assert!(outcome.moved);

        game.handle(Command::Flip);
        assert_eq!(game.active_side(), Side::Right);

        game.handle(Command::KeepPlaying);
        assert!(game.is_keep_playing());
        assert_eq!(game.actuator().continues, 1);
    }
}
