//! Centralized error types for the game.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;
use std::time::Duration;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur while loading data or running rounds.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("Round selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while reading the player roster.
#[derive(thiserror::Error, Debug)]
pub enum DataLoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Roster has {found} players, at least {required} are required")]
    TooSmall { found: usize, required: usize },
}

/// Errors from drawing distinct random indices.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Cannot draw {count} distinct values from [{min}, {max}]")]
    InsufficientRange { min: usize, max: usize, count: usize },

    #[error("Index {index} is outside a roster of {len} players")]
    OutsideRoster { index: usize, len: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract config: {0}")]
    Extract(#[from] figment::Error),

    #[error("Advance delay ({advance:?}) must be longer than reveal delay ({reveal:?})")]
    InvalidDelays { reveal: Duration, advance: Duration },

    #[error("Round time limit must be non-zero")]
    ZeroTimeLimit,

    #[error("Level-up score must be non-zero")]
    ZeroThreshold,

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid value {value:?} for {arg}")]
    InvalidArgument { arg: String, value: String },

    #[error("Unknown argument {0}")]
    UnknownArgument(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
