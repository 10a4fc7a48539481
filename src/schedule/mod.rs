//! Tick scheduling.
//!
//! The engine says how long until its next timed step (or that it has no
//! timer); the `Ticker` tracks that deadline and the `Runner` drives both
//! input commands and timer steps against a single engine.

pub mod clock;
pub mod runner;
pub mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use runner::Runner;
pub use ticker::Ticker;
