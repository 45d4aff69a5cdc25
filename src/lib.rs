//! # memory-game
//!
//! The Memory card game: find matching pairs on a face-down grid, grab the
//! jolly for bonus points and stay away from the bomb.
//!
//! ## Design Principles
//!
//! 1. **Core never does I/O**: `Game` is a pure turn state machine. Terminals,
//!    scripts and tests drive it through `session::InputProvider` and watch it
//!    through `session::PresentationSink`.
//!
//! 2. **Injected randomness**: every random decision draws from a `GameRng`
//!    passed in by the caller, so a seed replays a match exactly.
//!
//! 3. **Cheap snapshots**: the grid and turn history live in `im-rs`
//!    persistent vectors, so handing a `GameSnapshot` to a renderer is O(1).
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration
//! - `cards`: cards and the symbol pool
//! - `grid`: coordinates, validated grid sizes and the card grid
//! - `rules`: the turn state machine, turn history and leaderboard
//! - `session`: running a match against pluggable input and output
//! - `console`: the terminal front end

pub mod cards;
pub mod console;
pub mod core;
pub mod error;
pub mod grid;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    GameRng, GridConfig, MemoryConfig, Player, PlayerColor, PlayerId, PlayerMap, RosterConfig,
    ScoringConfig,
};

pub use crate::cards::{Card, CardId, CardKind};

pub use crate::grid::{Coord, Grid, GridSize};

pub use crate::rules::{
    EndReason, Game, GameSnapshot, Leaderboard, Reveal, Standing, TurnOutcome, TurnPhase,
    TurnRecord,
};

pub use crate::error::{ConfigError, SessionError, SetupError, TurnError};

pub use crate::session::{InputProvider, PresentationSink, Session};
