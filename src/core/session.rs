//! Game identifiers and the per-engine session state machine.
//!
//! ## Session lifecycle
//!
//! ```text
//! Menu --start--> Playing <--toggle--> Paused
//!                    |
//!                    +--terminal--> GameOver --restart--> Playing
//! ```
//!
//! Each engine owns exactly one `Session`. Score and high score live here so
//! the comparison against the external store happens in one place.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

use super::error::ArcadeError;
use crate::scores::ScoreStore;

/// Identifier of a game, also the key into the high-score store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameId {
    Snake,
    Tetris,
    Checkers,
}

impl GameId {
    pub const ALL: [GameId; 3] = [GameId::Snake, GameId::Tetris, GameId::Checkers];

    /// Store key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            GameId::Snake => "snake",
            GameId::Tetris => "tetris",
            GameId::Checkers => "checkers",
        }
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GameId {
    type Err = ArcadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        GameId::ALL
            .iter()
            .copied()
            .find(|g| g.key() == key)
            .ok_or_else(|| ArcadeError::UnknownGame(s.to_string()))
    }
}

/// Top-level state of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Score bookkeeping and lifecycle state for one engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    game: GameId,
    state: SessionState,
    score: u64,
    high_score: u64,
    new_high_score: bool,
}

impl Session {
    /// Create a session in `Menu`, seeding the high score from the store.
    pub fn new(game: GameId, scores: &dyn ScoreStore) -> Self {
        Self {
            game,
            state: SessionState::Menu,
            score: 0,
            high_score: scores.get(game),
            new_high_score: false,
        }
    }

    #[must_use]
    pub fn game(&self) -> GameId {
        self.game
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// True once this session's score has beaten the previous high score.
    #[must_use]
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    /// Back to `Menu` with a zero score. The high score is kept.
    pub fn reset(&mut self) {
        self.state = SessionState::Menu;
        self.score = 0;
        self.new_high_score = false;
    }

    /// Reset, then enter `Playing`.
    pub fn begin(&mut self) {
        self.reset();
        self.state = SessionState::Playing;
        info!(game = %self.game, high_score = self.high_score, "game started");
    }

    /// `Playing` -> `Paused`. Returns false from any other state.
    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.state = SessionState::Paused;
        true
    }

    /// `Paused` -> `Playing`. Returns false from any other state.
    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.state = SessionState::Playing;
        true
    }

    /// Leave to `Menu` without touching the board (the next start resets it).
    pub fn to_menu(&mut self) {
        self.state = SessionState::Menu;
    }

    /// Enter `GameOver`.
    pub fn finish(&mut self) {
        self.state = SessionState::GameOver;
        info!(
            game = %self.game,
            score = self.score,
            high_score = self.high_score,
            "game over"
        );
    }

    /// Add to the score and write the store if a new high score was reached.
    ///
    /// The store is only written with a value strictly greater than both the
    /// in-memory and the stored high score. Returns true when it was written.
    pub fn add_score(&mut self, delta: u64, scores: &mut dyn ScoreStore) -> bool {
        if delta == 0 {
            return false;
        }
        self.score += delta;

        let best = self.high_score.max(scores.get(self.game));
        if self.score > best {
            self.high_score = self.score;
            self.new_high_score = true;
            scores.set(self.game, self.score);
            info!(game = %self.game, high_score = self.score, "new high score");
            true
        } else {
            self.high_score = best;
            false
        }
    }
}
