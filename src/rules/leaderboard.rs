//! Final standings.

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerColor, PlayerId, PlayerMap};

/// One row of the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based place. Tied scores share a place.
    pub place: usize,
    pub player: PlayerId,
    pub name: String,
    pub score: u32,
    pub alive: bool,
    pub color: PlayerColor,
}

/// Players ordered by descending score. Ties keep roster order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    standings: Vec<Standing>,
}

impl Leaderboard {
    /// Rank a roster.
    #[must_use]
    pub fn from_players(players: &PlayerMap<Player>) -> Self {
        let mut ranked: Vec<(PlayerId, &Player)> = players.iter().collect();
        // Stable: equal scores stay in roster order.
        ranked.sort_by(|a, b| b.1.score().cmp(&a.1.score()));

        let standings = ranked
            .iter()
            .map(|&(id, player)| Standing {
                place: 1 + ranked
                    .iter()
                    .filter(|(_, other)| other.score() > player.score())
                    .count(),
                player: id,
                name: player.name().to_string(),
                score: player.score(),
                alive: player.is_alive(),
                color: player.color(),
            })
            .collect();

        Self { standings }
    }

    /// The first row, if any.
    #[must_use]
    pub fn leader(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// Everyone sharing first place.
    pub fn winners(&self) -> impl Iterator<Item = &Standing> {
        self.standings.iter().filter(|s| s.place == 1)
    }

    /// Check if a player shares first place.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners().any(|s| s.player == player)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Standing> {
        self.standings.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.standings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }
}
