//! Core types: players, RNG, configuration.

pub mod config;
pub mod player;
pub mod rng;

pub use config::{GridConfig, MemoryConfig, RosterConfig, ScoringConfig, MIN_CELLS};
pub use player::{Player, PlayerColor, PlayerId, PlayerMap};
pub use rng::GameRng;
