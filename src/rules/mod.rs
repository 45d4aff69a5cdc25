//! Game rules: the turn state machine, turn history and final standings.

pub mod engine;
pub mod history;
pub mod leaderboard;

pub use engine::{EndReason, Game, GameSnapshot, TurnPhase};
pub use history::{Reveal, TurnOutcome, TurnRecord};
pub use leaderboard::{Leaderboard, Standing};
