//! High-score persistence contract.
//!
//! The store outlives every session and is keyed by `GameId`. How it is
//! persisted is up to the host; this crate ships an in-memory store.
//!
//! Engines compare before writing: they only call `set` with a value
//! strictly greater than what `get` returned.

pub mod store;

pub use store::{MemoryScoreStore, ScoreStore};
