//! Engine trait and transition outcomes.

use std::time::Duration;

use crate::core::{Command, GameId, Session, SessionState};
use crate::scores::ScoreStore;

/// Result of offering a command or timer step to an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// State changed and the session continues.
    Applied,
    /// Illegal or irrelevant here; state unchanged.
    Rejected,
    /// State changed and the session ended.
    GameOver,
    /// The player asked to leave this game's screen. State unchanged.
    Exit,
}

impl Transition {
    /// True when the engine state was modified.
    #[must_use]
    pub fn changed(self) -> bool {
        matches!(self, Transition::Applied | Transition::GameOver)
    }
}

/// A simulation core.
///
/// ## Implementation Notes
///
/// - `apply_command`: illegal commands return `Rejected` and leave every
///   field untouched; there is no queued retry
/// - `timer_interval`: `None` whenever the session is not in a timed state,
///   which disarms the scheduler
/// - `on_timer`: one fixed-interval step; a no-op returning `Rejected` when
///   called while the timer should be disarmed
/// - Score writes go through `Session::add_score`, which compares against
///   the store before writing
pub trait Engine {
    /// Session bookkeeping (state, score, high score).
    fn session(&self) -> &Session;

    /// Interpret one input command against the live state.
    fn apply_command(&mut self, command: Command, scores: &mut dyn ScoreStore) -> Transition;

    /// Interval until the next timed step, or `None` when the timer is off.
    fn timer_interval(&self) -> Option<Duration>;

    /// Perform one timed step.
    fn on_timer(&mut self, scores: &mut dyn ScoreStore) -> Transition;

    /// Discard the board and session counters and return to `Menu`.
    fn reset(&mut self);

    // === Convenience Methods ===

    fn game_id(&self) -> GameId {
        self.session().game()
    }

    fn state(&self) -> SessionState {
        self.session().state()
    }

    fn score(&self) -> u64 {
        self.session().score()
    }

    fn is_game_over(&self) -> bool {
        self.state() == SessionState::GameOver
    }

    /// Apply a command to a copy, leaving `self` untouched.
    ///
    /// Boards are persistent, so the copy is cheap. Useful for previews and
    /// for testing transitions as pure functions.
    fn with_command(&self, command: Command, scores: &mut dyn ScoreStore) -> (Self, Transition)
    where
        Self: Clone + Sized,
    {
        let mut next = self.clone();
        let transition = next.apply_command(command, scores);
        (next, transition)
    }
}
