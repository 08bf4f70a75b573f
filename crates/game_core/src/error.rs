//! Error types for player construction and move selection.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected player configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("search depth must be positive, got {0}")]
    NonPositiveDepth(i64),
    #[error("search depth {0} is too large")]
    DepthOutOfRange(i64),
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Contract violations surfaced by `Player::select_move`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("player was asked to move before initialize() assigned its color")]
    Uninitialized,
    #[error("no legal moves in the position handed to the player")]
    NoLegalMoves,
}
