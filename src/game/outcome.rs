//! Per-turn results.

use crate::core::Position;

/// What a slide or transfer did.
///
/// Commands that change no tiles return `TurnOutcome::default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Whether any tile left its cell.
    pub moved: bool,
    /// Number of merges performed.
    pub merges: u32,
    /// Score gained this turn.
    pub score_delta: u64,
    /// Where the post-move tile spawned, if one did.
    pub spawned: Option<Position>,
}

impl TurnOutcome {
    /// Count a merge that produced `value`.
    pub fn record_merge(&mut self, value: u32) {
        self.moved = true;
        self.merges += 1;
        self.score_delta += u64::from(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_merge() {
        let mut outcome = TurnOutcome::default();
        outcome.record_merge(4);
        outcome.record_merge(16);

        assert!(outcome.moved);
        assert_eq!(outcome.merges, 2);
        assert_eq!(outcome.score_delta, 20);
        assert!(outcome.spawned.is_none());
    }
}
