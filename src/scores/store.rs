//! Score store trait and the in-memory implementation.

use rustc_hash::FxHashMap;

use crate::core::GameId;

/// External key-value store of high scores.
pub trait ScoreStore {
    /// Stored high score for `game`, 0 when nothing was stored.
    fn get(&self, game: GameId) -> u64;

    /// Record a high score for `game`.
    ///
    /// Callers only write values greater than the current one, but stores
    /// must still keep the maximum so repeated or stale writes are harmless.
    fn set(&mut self, game: GameId, score: u64);
}

/// In-memory store backed by a hash map.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    scores: FxHashMap<GameId, u64>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of games with a stored score.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self, game: GameId) -> u64 {
        self.scores.get(&game).copied().unwrap_or(0)
    }

    fn set(&mut self, game: GameId, score: u64) {
        let entry = self.scores.entry(game).or_insert(0);
        *entry = (*entry).max(score);
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn get(&self, game: GameId) -> u64 {
        (**self).get(game)
    }

    fn set(&mut self, game: GameId, score: u64) {
        (**self).set(game, score);
    }
}
