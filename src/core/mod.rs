//! Core types shared by every engine: boards, commands, sessions, sides, RNG,
//! configuration, errors.
//!
//! Nothing here knows the rules of a particular game.

pub mod command;
pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod session;
pub mod side;

pub use command::Command;
pub use config::{ArcadeConfig, CheckersConfig, SnakeConfig, TetrisConfig};
pub use error::ArcadeError;
pub use grid::{Grid, Pos};
pub use rng::GameRng;
pub use session::{GameId, Session, SessionState};
pub use side::Side;
