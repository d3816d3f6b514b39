//! Persistence collaborator.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::snapshot::SavedState;

/// Key holding the JSON-encoded game snapshot.
pub const GAME_STATE_KEY: &str = "gameState";

/// Key holding the best score as a decimal string.
pub const BEST_SCORE_KEY: &str = "bestScore";

/// Where the game manager keeps snapshots and the best score.
///
/// Calls are best-effort. Implementations log failures instead of
/// returning them; the game never waits on or rolls back for storage.
pub trait StorageManager {
    /// The stored snapshot, if any.
    fn game_state(&self) -> Option<SavedState>;

    /// Replace the stored snapshot.
    fn set_game_state(&mut self, state: &SavedState);

    /// Forget the stored snapshot. The best score is kept.
    fn clear_game_state(&mut self);

    /// Best score seen so far (0 if none).
    fn best_score(&self) -> u64;

    /// Replace the best score.
    fn set_best_score(&mut self, score: u64);
}

/// In-memory key/value storage with string values, in the shape of a
/// browser's local storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage already holding `state`.
    #[must_use]
    pub fn with_game_state(state: &SavedState) -> Self {
        let mut storage = Self::new();
        storage.set_game_state(state);
        storage
    }

    /// Raw value under `key`.
    #[must_use]
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Set the raw value under `key`.
    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    /// Remove the raw value under `key`.
    pub fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

impl StorageManager for MemoryStorage {
    fn game_state(&self) -> Option<SavedState> {
        let json = self.get_item(GAME_STATE_KEY)?;
        match SavedState::from_json(json) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(%err, "ignoring unreadable stored game state");
                None
            }
        }
    }

    fn set_game_state(&mut self, state: &SavedState) {
        match state.to_json() {
            Ok(json) => self.set_item(GAME_STATE_KEY, json),
            Err(err) => warn!(%err, "failed to encode game state"),
        }
    }

    fn clear_game_state(&mut self) {
        self.remove_item(GAME_STATE_KEY);
    }

    fn best_score(&self) -> u64 {
        let Some(raw) = self.get_item(BEST_SCORE_KEY) else {
            return 0;
        };
        raw.parse().unwrap_or_else(|err| {
            warn!(%err, raw, "ignoring unreadable best score");
            0
        })
    }

    fn set_best_score(&mut self, score: u64) {
        self.set_item(BEST_SCORE_KEY, score.to_string());
    }
}
