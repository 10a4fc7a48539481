//! The simulation cores.
//!
//! Each game owns its board and session exclusively and implements
//! [`Engine`](crate::rules::Engine).

pub mod checkers;
pub mod snake;
pub mod tetris;

pub use checkers::CheckersGame;
pub use snake::SnakeGame;
pub use tetris::TetrisGame;
