//! Error type for the fallible surfaces of the crate.
//!
//! Gameplay itself never fails: illegal commands are rejected with no state
//! change and terminal conditions are ordinary transitions. Errors only come
//! from configuration, from arranging a custom position, and from parsing
//! identifiers supplied by the host.

/// Errors returned by configuration loading, position setup and parsing.
#[derive(thiserror::Error, Debug)]
pub enum ArcadeError {
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
    #[error("unknown game: {0:?}")]
    UnknownGame(String),
}
