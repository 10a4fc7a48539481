//! Tetris.
//!
//! - Pieces are chosen uniformly from the seven tetrominoes, with one piece
//!   of look-ahead
//! - Gravity moves the falling piece down one row per tick; a piece that
//!   cannot move down locks into the board
//! - Locking clears full rows, scores `LINE_SCORES[n] * level`, and levels
//!   up every ten cleared lines (shortening the tick)
//! - A piece that collides where it spawns ends the game
//! - Moves and rotations that would collide are silently dropped

mod game;
mod piece;

pub use game::{Cell, LockReport, TetrisGame, LINE_SCORES};
pub use piece::{Color, Piece, PieceKind, PieceQueue, Shape};
