//! Error types for the settings boundary and the controller API
//!
//! The simulation itself never fails; these only cover loading configuration
//! and caller mistakes against [`crate::game::Game`].

use std::path::PathBuf;

use thiserror::Error;

/// Settings could not be loaded or describe an unplayable game
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings JSON is malformed
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),

    /// The level sequence is empty
    #[error("at least one level must be configured")]
    NoLevels,

    /// A level starts with no balls
    #[error("level {level} has no initial balls")]
    EmptyLevel { level: usize },

    /// A level's kill target is zero or larger than its ball count
    #[error("level {level} target {target} must be between 1 and {initial_balls}")]
    InvalidTarget {
        level: usize,
        target: u32,
        initial_balls: u32,
    },

    /// Frame cadence must be positive
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

/// Controller called with arguments that don't fit the current session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Level index past the end of the configured sequence
    #[error("level {index} out of range ({count} levels configured)")]
    LevelOutOfRange { index: usize, count: usize },
}
