//! Error types.
//!
//! Game rules themselves never fail. Errors only arise at the edges:
//! restoring a snapshot and decoding input events.

use super::position::{Position, Side};

/// A stored snapshot that cannot be turned back into a game.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("{side} grid has size 0")]
    ZeroSize { side: Side },
    #[error("{side} grid has {found} columns, expected {expected}")]
    RowCount { side: Side, expected: usize, found: usize },
    #[error("{side} grid column {x} has {found} cells, expected {expected}")]
    ColumnCount {
        side: Side,
        x: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid sizes differ: left {left}, right {right}")]
    SizeMismatch { left: usize, right: usize },
    #[error("tile in cell {cell} claims position {found}")]
    TilePosition { cell: Position, found: Position },
    #[error("tile in cell {cell} has invalid value {value}")]
    TileValue { cell: Position, value: u32 },
    #[error("exactly one grid must be active (left: {left}, right: {right})")]
    ActiveFlags { left: bool, right: bool },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An input event that does not map to a command.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid direction {0}, expected 0-3")]
    InvalidDirection(u8),
    #[error("move event without a direction")]
    MissingDirection,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SnapshotError::ActiveFlags { left: true, right: true };
        assert_eq!(
            err.to_string(),
            "exactly one grid must be active (left: true, right: true)"
        );

        let err = SnapshotError::TilePosition {
            cell: Position::new(1, 2, Side::Left),
            found: Position::new(2, 1, Side::Left),
        };
        assert_eq!(err.to_string(), "tile in cell left(1, 2) claims position left(2, 1)");

        assert_eq!(
            CommandError::InvalidDirection(9).to_string(),
            "invalid direction 9, expected 0-3"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: SnapshotError = parse.into();
        assert!(matches!(err, SnapshotError::Json(_)));
    }
}
