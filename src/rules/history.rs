//! Turn history: what was revealed and how each turn ended.
//!
//! Every resolved turn produces a `TurnRecord`. The game keeps them in a
//! persistent vector so snapshots and replays can share the history cheaply,
//! and the presentation layer renders them as they happen.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::PlayerId;
use crate::grid::Coord;

/// A card turned face up by a guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub coord: Coord,
    pub card: Card,
}

/// How a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The bomb was revealed and the player is out.
    Eliminated,
    /// The jolly was revealed.
    Bonus { points: u32 },
    /// Two cards of a pair were revealed.
    Matched { points: u32 },
    /// Two unrelated cards were revealed.
    Mismatched,
}

impl TurnOutcome {
    /// Whether the same player takes the next turn.
    #[must_use]
    pub fn keeps_turn(self) -> bool {
        matches!(self, TurnOutcome::Bonus { .. } | TurnOutcome::Matched { .. })
    }

    /// Points awarded by this outcome.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            TurnOutcome::Bonus { points } | TurnOutcome::Matched { points } => points,
            TurnOutcome::Eliminated | TurnOutcome::Mismatched => 0,
        }
    }
}

/// A resolved turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Sequence number, starting at 1.
    pub turn: u32,
    pub player: PlayerId,
    pub first: Reveal,
    /// Absent when the first card was the bomb or the jolly.
    pub second: Option<Reveal>,
    pub outcome: TurnOutcome,
}

impl TurnRecord {
    /// The revealed cards in guess order.
    pub fn reveals(&self) -> impl Iterator<Item = &Reveal> {
        std::iter::once(&self.first).chain(self.second.as_ref())
    }
}
