//! The turn state machine.
//!
//! A `Game` owns the roster and the grid and moves through four phases:
//!
//! ```text
//! AwaitingFirstGuess --guess(normal)--> AwaitingSecondGuess --guess--> TurnResolution
//!        |                                                                  ^
//!        +----------------------guess(bomb | jolly)-------------------------+
//!
//! TurnResolution --resolve--> AwaitingFirstGuess (same or next player) | GameOver
//! ```
//!
//! `guess` only reveals; nothing is scored or removed until `resolve`, so a
//! presentation layer can show the revealed cards in between.
//!
//! ## Resolution rules
//!
//! - Bomb: the player is eliminated, the bomb leaves the grid, rotation advances.
//! - Jolly: the player gains its points, the jolly leaves the grid, same player again.
//! - Matching pair: the player gains the pair's points, the pair leaves the grid,
//!   same player again.
//! - Anything else: rotation advances.
//!
//! Every resolution turns all remaining cards face down. The game ends when
//! the grid is empty, or when nobody is left alive to clear it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::history::{Reveal, TurnOutcome, TurnRecord};
use super::leaderboard::Leaderboard;
use crate::cards::Card;
use crate::core::{GameRng, MemoryConfig, Player, PlayerColor, PlayerId, PlayerMap};
use crate::error::{ConfigError, SetupError, TurnError};
use crate::grid::{Coord, Grid, GridSize};

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Every card has been resolved.
    GridCleared,
    /// Every player was eliminated with cards still on the grid.
    AllEliminated,
}

/// Where the turn state machine stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingFirstGuess {
        player: PlayerId,
    },
    AwaitingSecondGuess {
        player: PlayerId,
        first: Reveal,
    },
    /// Cards are revealed and waiting for `Game::resolve`.
    TurnResolution {
        player: PlayerId,
        first: Reveal,
        second: Option<Reveal>,
    },
    GameOver {
        reason: EndReason,
    },
}

impl TurnPhase {
    /// The acting player, unless the game is over.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            TurnPhase::AwaitingFirstGuess { player }
            | TurnPhase::AwaitingSecondGuess { player, .. }
            | TurnPhase::TurnResolution { player, .. } => Some(*player),
            TurnPhase::GameOver { .. } => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, TurnPhase::GameOver { .. })
    }
}

/// Owned view of a game for presentation.
///
/// Cheap to take: the grid is backed by a persistent vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub players: Vec<Player>,
    pub phase: TurnPhase,
    /// Number of the turn in progress, starting at 1.
    pub turn: u32,
}

impl GameSnapshot {
    /// The acting player's entry, if the game is still running.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.phase.player().map(|id| &self.players[id.index()])
    }
}

/// One match of Memory.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    players: PlayerMap<Player>,
    phase: TurnPhase,
    turn: u32,
    history: Vector<TurnRecord>,
}

impl Game {
    /// Start a match on an already populated grid.
    ///
    /// The first living player opens. An empty grid, or a roster with nobody
    /// alive, yields a game that is already over.
    pub fn new(players: Vec<Player>, grid: Grid) -> Result<Self, SetupError> {
        if players.is_empty() || players.len() > 255 {
            return Err(SetupError::RosterSize {
                count: players.len(),
                min: 1,
                max: 255,
            });
        }
        let players = PlayerMap::from_vec(players);

        let mut game = Self {
            grid,
            players,
            phase: TurnPhase::GameOver {
                reason: EndReason::GridCleared,
            },
            turn: 1,
            history: Vector::new(),
        };
        let last = PlayerId::new((game.players.player_count() - 1) as u8);
        game.phase = game.phase_after(game.next_living_after(last));
        Ok(game)
    }

    /// Validate settings and deal a fresh grid.
    ///
    /// `config` itself is validated first, then roster size, name lengths
    /// and grid dimensions are checked against it. Player colors come from a separate stream of `rng` so they
    /// never change the grid layout for a given seed.
    pub fn setup(
        config: &MemoryConfig,
        names: Vec<String>,
        rows: usize,
        cols: usize,
        rng: &mut GameRng,
    ) -> Result<Self, SetupError> {
        config.validate().map_err(|err| match err {
            ConfigError::Validation(msg) => SetupError::Config(msg),
            other => SetupError::Config(other.to_string()),
        })?;

        let roster = &config.roster;
        if !(roster.min_players..=roster.max_players).contains(&names.len()) {
            return Err(SetupError::RosterSize {
                count: names.len(),
                min: roster.min_players,
                max: roster.max_players,
            });
        }
        for (index, name) in names.iter().enumerate() {
            let len = name.chars().count();
            if !(roster.min_name_length..=roster.max_name_length).contains(&len) {
                return Err(SetupError::NameLength {
                    index: index + 1,
                    len,
                    min: roster.min_name_length,
                    max: roster.max_name_length,
                });
            }
        }
        let size = GridSize::new(rows, cols, &config.grid)?;

        let mut colors = rng.for_context("colors");
        let players = names
            .into_iter()
            .map(|name| Player::new(name, PlayerColor::random(&mut colors)))
            .collect();
        let grid = Grid::filled(size, &config.scoring, rng);

        Self::new(players, grid)
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// The acting player, unless the game is over.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.phase.player()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Why the match ended, once it has.
    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            TurnPhase::GameOver { reason } => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Number of the turn in progress, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Every resolved turn, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// Players still in the match.
    pub fn living_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(|(_, p)| p.is_alive())
            .map(|(id, _)| id)
    }

    /// Standings by descending score.
    #[must_use]
    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::from_players(&self.players)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.clone(),
            players: self.players.as_slice().to_vec(),
            phase: self.phase.clone(),
            turn: self.turn,
        }
    }

    /// Reveal the card at `coord` for the acting player.
    ///
    /// Rejected guesses leave the game untouched, so the caller can ask
    /// again. Guessing the first card's cell a second time is allowed and
    /// resolves as a mismatch.
    pub fn guess(&mut self, coord: Coord) -> Result<Reveal, TurnError> {
        let (player, first) = match &self.phase {
            TurnPhase::AwaitingFirstGuess { player } => (*player, None),
            TurnPhase::AwaitingSecondGuess { player, first } => (*player, Some(first.clone())),
            TurnPhase::TurnResolution { .. } => return Err(TurnError::AwaitingResolution),
            TurnPhase::GameOver { .. } => return Err(TurnError::GameOver),
        };

        if !self.grid.contains(coord) {
            return Err(TurnError::OutOfBounds {
                coord,
                rows: self.grid.rows(),
                cols: self.grid.cols(),
            });
        }
        let card = self.grid.card_mut(coord).ok_or(TurnError::EmptyCell(coord))?;
        card.flip_to(true);
        let reveal = Reveal {
            coord,
            card: card.clone(),
        };

        self.phase = match first {
            None if reveal.card.is_special() => TurnPhase::TurnResolution {
                player,
                first: reveal.clone(),
                second: None,
            },
            None => TurnPhase::AwaitingSecondGuess {
                player,
                first: reveal.clone(),
            },
            Some(first) => TurnPhase::TurnResolution {
                player,
                first,
                second: Some(reveal.clone()),
            },
        };
        Ok(reveal)
    }

    /// Score the revealed cards and hand the turn on.
    pub fn resolve(&mut self) -> Result<TurnRecord, TurnError> {
        let (player, first, second) = match &self.phase {
            TurnPhase::TurnResolution {
                player,
                first,
                second,
            } => (*player, first.clone(), second.clone()),
            TurnPhase::GameOver { .. } => return Err(TurnError::GameOver),
            _ => return Err(TurnError::NothingToResolve),
        };

        let outcome = match (&first, &second) {
            (r, _) if r.card.is_special() => self.resolve_special(player, &r.card),
            (_, Some(r)) if r.card.is_special() => self.resolve_special(player, &r.card),
            (a, Some(b)) if a.card.matches(&b.card) => {
                let points = a.card.points();
                self.players[player].add_score(points);
                self.grid.pop_card(&a.card);
                TurnOutcome::Matched { points }
            }
            _ => TurnOutcome::Mismatched,
        };

        self.grid.flip_all_cards();

        let next = if outcome.keeps_turn() {
            Some(player)
        } else {
            self.next_living_after(player)
        };
        self.phase = self.phase_after(next);

        let record = TurnRecord {
            turn: self.turn,
            player,
            first,
            second,
            outcome,
        };
        self.turn += 1;
        self.history.push_back(record.clone());
        Ok(record)
    }

    fn resolve_special(&mut self, player: PlayerId, card: &Card) -> TurnOutcome {
        self.grid.pop_card(card);
        if card.is_bomb() {
            self.players[player].eliminate();
            TurnOutcome::Eliminated
        } else {
            let points = card.points();
            self.players[player].add_score(points);
            TurnOutcome::Bonus { points }
        }
    }

    /// The first living player after `current` in roster order, wrapping
    /// around to `current` itself.
    fn next_living_after(&self, current: PlayerId) -> Option<PlayerId> {
        let count = self.players.player_count();
        let mut candidate = current;
        for _ in 0..count {
            candidate = candidate.next(count);
            if self.players[candidate].is_alive() {
                return Some(candidate);
            }
        }
        None
    }

    fn phase_after(&self, next: Option<PlayerId>) -> TurnPhase {
        if self.grid.is_empty() {
            return TurnPhase::GameOver {
                reason: EndReason::GridCleared,
            };
        }
        match next {
            Some(player) => TurnPhase::AwaitingFirstGuess { player },
            None => TurnPhase::GameOver {
                reason: EndReason::AllEliminated,
            },
        }
    }
}
