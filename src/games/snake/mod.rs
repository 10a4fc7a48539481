//! Snake.
//!
//! - The snake starts as one segment on a fixed cell, not moving
//! - Start sets the default heading (+x) and the tick timer runs
//! - Each tick the head advances one cell; leaving the board or running into
//!   the body ends the game (wall check first)
//! - Eating food scores, grows the snake by one and speeds up the tick,
//!   down to a floor
//! - Steering onto the axis already in motion is rejected, which rules out
//!   instant reversal

mod game;

pub use game::{SnakeCell, SnakeGame};
