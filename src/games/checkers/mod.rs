//! Checkers on an 8x8 board.
//!
//! - Red moves first; red starts on the top three rows
//! - Men step along their two forward diagonals, kings along all four
//! - Captures jump an adjacent opposing piece onto an empty landing square
//! - If any piece of the side on turn can capture, it must capture
//! - After a capture the same piece keeps capturing while it can
//! - A man reaching the far row is crowned
//! - A side with no pieces, or with no legal move on its turn, loses
//!
//! The optional computer side moves on the engine timer after a short delay.

mod ai;
mod board;
mod game;

pub use ai::{CaptureFirst, MovePolicy};
pub use board::{
    captures_from, count_pieces, has_capture, initial_board, legal_moves, piece_at, piece_moves,
    Board, Checker, Move, Side, SideMap, Square, BOARD_SIZE,
};
pub use game::{CheckersGame, EndReason, GameResult};
