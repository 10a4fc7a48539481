//! Engine trait implemented by every simulation core.
//!
//! Engines define:
//! - How input commands change state
//! - What the timer does (gravity, snake step, AI move)
//! - When the timer runs
//!
//! The scheduler and host call into `Engine` but never interpret
//! game-specific concepts directly.

pub mod engine;

pub use engine::{Engine, Transition};
