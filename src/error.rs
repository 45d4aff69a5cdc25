//! Structured error types.

use std::path::PathBuf;

use crate::grid::Coord;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Rejected game settings. Raised before a `Game` exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("roster size {count} out of range [{min}, {max}]")]
    RosterSize { count: usize, min: usize, max: usize },

    #[error("name of player #{index} has {len} characters, expected [{min}, {max}]")]
    NameLength {
        index: usize,
        len: usize,
        min: usize,
        max: usize,
    },

    #[error("invalid grid size {rows}x{cols}: {reason}")]
    GridSize {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },
}

/// Rejected turn operations. The game state is unchanged when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("the game is over")]
    GameOver,

    #[error("the revealed cards must be resolved first")]
    AwaitingResolution,

    #[error("no revealed cards to resolve")]
    NothingToResolve,

    #[error("coordinate {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds { coord: Coord, rows: usize, cols: usize },

    #[error("cell {0} is empty")]
    EmptyCell(Coord),
}

/// Errors that end a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before the game finished")]
    InputClosed,

    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    #[error("turn error: {0}")]
    Turn(#[from] TurnError),
}
