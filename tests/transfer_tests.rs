//! Cross-grid transfer (`merge` command) integration tests.

use flip_2048::{
    Command, Direction, GameConfig, GameManager, Grid, MemoryStorage, Position, RecordingActuator,
    SavedState, Side, Tile,
};

type TestGame = GameManager<MemoryStorage, RecordingActuator>;

fn grid(size: usize, side: Side, active: bool, tiles: &[(i32, i32, u32)]) -> Grid {
    let mut grid = Grid::new(size, side, active);
    for &(x, y, value) in tiles {
        grid.insert_tile(Tile::new(Position::new(x, y, side), value));
    }
    grid
}

fn arrange(
    config: GameConfig,
    left: &[(i32, i32, u32)],
    right: &[(i32, i32, u32)],
    active: Side,
) -> TestGame {
    let saved = SavedState {
        grid: grid(config.size, Side::Left, active == Side::Left, left).serialize(),
        right_grid: grid(config.size, Side::Right, active == Side::Right, right).serialize(),
        score: 0,
        over: false,
        won: false,
        keep_playing: false,
    };
    GameManager::new(config, MemoryStorage::with_game_state(&saved), RecordingActuator::new())
}

fn value_at(game: &TestGame, side: Side, x: i32, y: i32) -> Option<u32> {
    game.grid(side)
        .cell_content(Position::new(x, y, side))
        .map(|t| t.value)
}

/// Checkerboard of 2s and 4s covering every cell except `hole`.
fn checkerboard_except(size: i32, hole: (i32, i32)) -> Vec<(i32, i32, u32)> {
    let mut tiles = Vec::new();
    for x in 0..size {
        for y in 0..size {
            if (x, y) != hole {
                tiles.push((x, y, if (x + y) % 2 == 0 { 2 } else { 4 }));
            }
        }
    }
    tiles
}

// =============================================================================
// Moves Into Empty Cells
// =============================================================================

#[test]
fn test_transfer_into_empty_cell() {
    let right = checkerboard_except(4, (1, 1));
    let mut game = arrange(GameConfig::default().with_seed(1), &[(1, 1, 8)], &right, Side::Left);

    let outcome = game.handle(Command::Merge);

    assert!(outcome.moved);
    assert_eq!(outcome.merges, 0);
    assert_eq!(outcome.score_delta, 0);

    let moved = game.right_grid().cell_content(Position::new(1, 1, Side::Right)).unwrap();
    assert_eq!(moved.value, 8);
    assert_eq!(moved.side, Side::Right);
    assert_eq!(moved.previous_position, Some(Position::new(1, 1, Side::Left)));
    assert!(!game.right_grid().cells_available());

    // The vacated grid receives the spawn; the right grid stays inactive.
    let spawned = outcome.spawned.unwrap();
    assert_eq!(spawned.side, Side::Left);
    assert_eq!(game.left_grid().tile_count(), 1);
    assert_eq!(game.active_side(), Side::Left);
}

#[test]
fn test_transfer_keeps_coordinates() {
    let mut game = arrange(
        GameConfig::default().with_seed(2),
        &[(0, 3, 2), (2, 1, 4), (3, 0, 8)],
        &[],
        Side::Left,
    );

    game.merge();

    assert_eq!(value_at(&game, Side::Right, 0, 3), Some(2));
    assert_eq!(value_at(&game, Side::Right, 2, 1), Some(4));
    assert_eq!(value_at(&game, Side::Right, 3, 0), Some(8));
    assert_eq!(game.right_grid().tile_count(), 3);
}

#[test]
fn test_transfer_from_right_grid() {
    let mut game = arrange(GameConfig::default().with_seed(3), &[], &[(2, 2, 16)], Side::Right);

    let outcome = game.merge();

    assert!(outcome.moved);
    assert_eq!(value_at(&game, Side::Left, 2, 2), Some(16));
    assert_eq!(outcome.spawned.unwrap().side, Side::Right);
}

// =============================================================================
// Merges Across Grids
// =============================================================================

#[test]
fn test_transfer_merges_equal_values() {
    let mut game = arrange(
        GameConfig::default().with_seed(4),
        &[(0, 0, 4), (3, 3, 2)],
        &[(0, 0, 4)],
        Side::Left,
    );

    let outcome = game.merge();

    assert_eq!(outcome.merges, 1);
    assert_eq!(outcome.score_delta, 8);
    assert_eq!(game.score(), 8);
    assert_eq!(value_at(&game, Side::Right, 0, 0), Some(8));
    assert_eq!(value_at(&game, Side::Right, 3, 3), Some(2));

    let merged = game.right_grid().cell_content(Position::new(0, 0, Side::Right)).unwrap();
    assert!(merged.is_merged());
}

#[test]
fn test_transfer_blocked_by_unequal_tile() {
    let mut game = arrange(
        GameConfig::default().with_seed(5),
        &[(1, 2, 2)],
        &[(1, 2, 4)],
        Side::Left,
    );
    let before = game.serialize();

    let outcome = game.merge();

    assert!(!outcome.moved);
    assert!(outcome.spawned.is_none());
    assert_eq!(game.serialize(), before);
}

#[test]
fn test_transfer_win_threshold() {
    let mut game = arrange(
        GameConfig::default().with_seed(6),
        &[(0, 0, 16)],
        &[(0, 0, 16)],
        Side::Left,
    );

    game.merge();

    assert_eq!(value_at(&game, Side::Right, 0, 0), Some(32));
    assert!(game.right_grid().is_won());
    assert!(!game.left_grid().is_won());
    assert!(!game.is_won());
    assert!(!game.is_game_terminated());
}

#[test]
fn test_slide_then_transfer_wins_game() {
    let config = GameConfig::default().with_seed(7).with_slide_win_value(8);
    let mut game = arrange(
        config,
        &[(0, 0, 4), (1, 0, 4), (0, 3, 16)],
        &[(0, 3, 16)],
        Side::Left,
    );

    game.move_tiles(Direction::Left);
    assert!(game.left_grid().is_won());
    assert!(!game.is_won());

    let outcome = game.merge();
    assert_eq!(outcome.merges, 1);
    assert_eq!(value_at(&game, Side::Right, 0, 3), Some(32));
    assert_eq!(value_at(&game, Side::Right, 0, 0), Some(8));
    assert!(game.right_grid().is_won());
    assert!(game.is_won());
    assert!(game.is_game_terminated());
}

#[test]
fn test_custom_transfer_win_value() {
    let mut game = arrange(
        GameConfig::default().with_seed(8).with_transfer_win_value(8),
        &[(0, 0, 4)],
        &[(0, 0, 4), (3, 3, 4)],
        Side::Left,
    );

    game.merge();
    assert!(game.right_grid().is_won());

    let mut game = arrange(
        GameConfig::default().with_seed(8).with_transfer_win_value(8),
        &[(0, 0, 4)],
        &[(0, 0, 4)],
        Side::Right,
    );
    game.merge();
    assert!(game.left_grid().is_won());
}

#[test]
fn test_terminated_game_refuses_transfer() {
    let mut saved = arrange(GameConfig::default().with_seed(10), &[(0, 0, 2)], &[], Side::Left)
        .serialize();
    saved.over = true;

    let mut game = GameManager::new(
        GameConfig::default().with_seed(10),
        MemoryStorage::with_game_state(&saved),
        RecordingActuator::new(),
    );
    assert!(game.is_game_terminated());

    let outcome = game.handle(Command::Merge);
    assert!(!outcome.moved);
    assert_eq!(game.serialize(), saved);
}
