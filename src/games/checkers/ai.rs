//! Move policies for the computer-controlled side.

use crate::core::GameRng;

use super::board::Move;

/// Picks a move for the side on turn.
pub trait MovePolicy {
    /// Choose one of `moves`. Returns `None` if `moves` is empty.
    fn choose_move(&self, moves: &[Move], rng: &mut GameRng) -> Option<Move>;
}

/// Uniform random mover that always takes a capture when one exists.
///
/// Not a strong opponent. Captures are filtered first so the choice mirrors
/// the mandatory-capture rule even if handed an unfiltered move list.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaptureFirst;

impl MovePolicy for CaptureFirst {
    fn choose_move(&self, moves: &[Move], rng: &mut GameRng) -> Option<Move> {
        let captures: Vec<Move> = moves.iter().copied().filter(Move::is_capture).collect();
        let pool = if captures.is_empty() { moves } else { &captures[..] };
        rng.choose(pool).copied()
    }
}
