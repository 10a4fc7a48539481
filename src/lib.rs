//! # arcade-cores
//!
//! Simulation cores for a small arcade: Snake, Tetris and Checkers.
//!
//! ## Design Principles
//!
//! 1. **Rendering-Agnostic**: Engines own board and session state and expose
//!    read-only snapshots. Drawing, routing and key wiring live in the host.
//!
//! 2. **One Command Set**: Every engine interprets the same abstract
//!    `Command`s; illegal commands are rejected with no state change.
//!
//! 3. **Injected Collaborators**: Randomness (`GameRng`) and the high-score
//!    store (`ScoreStore`) are passed in, so every behavior is reproducible
//!    under a fixed seed.
//!
//! ## Architecture
//!
//! - **Single Writer**: One transition is fully applied before the next
//!   command or timer step is considered. `Runner` enforces this.
//!
//! - **Disarmed Timers**: `Engine::timer_interval()` returns `None` outside
//!   timed states; the scheduler drops pending time instead of ignoring ticks.
//!
//! - **Persistent Boards**: `im`-backed grids make snapshots and
//!   `Engine::with_command` previews O(1) to clone.
//!
//! ## Modules
//!
//! - `core`: Grid, commands, sessions, RNG, configuration, errors
//! - `scores`: High-score store contract and in-memory store
//! - `rules`: `Engine` trait and `Transition` outcomes
//! - `schedule`: Clocks, ticker and the engine runner
//! - `games`: Snake, Tetris and Checkers

pub mod core;
pub mod games;
pub mod rules;
pub mod schedule;
pub mod scores;

// Re-export commonly used types
pub use crate::core::{
    ArcadeConfig, ArcadeError, CheckersConfig, Command, GameId, GameRng, Grid, Pos, Session,
    SessionState, Side, SnakeConfig, TetrisConfig,
};

pub use crate::rules::{Engine, Transition};

pub use crate::schedule::{Clock, ManualClock, Runner, SystemClock, Ticker};

pub use crate::scores::{MemoryScoreStore, ScoreStore};

pub use crate::games::checkers::{CheckersGame, EndReason, GameResult, Square};
pub use crate::games::snake::{SnakeCell, SnakeGame};
pub use crate::games::tetris::{PieceKind, TetrisGame};
