//! Running a match against pluggable input and output.
//!
//! The core never reads a terminal. A `Session` asks an [`InputProvider`]
//! for settings and guesses, feeds them to a [`Game`], and reports every step
//! to a [`PresentationSink`]. Rejected guesses are reported and asked for
//! again; everything else that goes wrong ends the session.

use std::io;

use crate::core::config::GridConfig;
use crate::core::{GameRng, MemoryConfig};
use crate::error::{SessionError, TurnError};
use crate::grid::Coord;
use crate::rules::{EndReason, Game, GameSnapshot, Leaderboard, Reveal, TurnPhase, TurnRecord};

/// Source of player decisions.
pub trait InputProvider {
    /// Number of players, in `[min, max]`.
    fn read_roster_size(&mut self, min: usize, max: usize) -> Result<usize, SessionError>;

    /// Name of player `index` (1-based), `min_len..=max_len` characters long.
    fn read_player_name(
        &mut self,
        index: usize,
        min_len: usize,
        max_len: usize,
    ) -> Result<String, SessionError>;

    /// Grid dimensions as `(rows, cols)` within `limits`.
    fn read_grid_size(&mut self, limits: &GridConfig) -> Result<(usize, usize), SessionError>;

    /// A 1-based coordinate in `[1, rows] x [1, cols]`.
    fn read_coordinate(&mut self, rows: usize, cols: usize) -> Result<Coord, SessionError>;

    /// Pause until the player is ready to go on.
    fn acknowledge(&mut self) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Observer of a running match. Nothing it does feeds back into the game.
pub trait PresentationSink {
    fn session_started(&mut self, _config: &MemoryConfig) -> io::Result<()> {
        Ok(())
    }

    fn turn_started(&mut self, _snapshot: &GameSnapshot) -> io::Result<()> {
        Ok(())
    }

    fn card_revealed(&mut self, _snapshot: &GameSnapshot, _reveal: &Reveal) -> io::Result<()> {
        Ok(())
    }

    fn guess_rejected(&mut self, _error: &TurnError) -> io::Result<()> {
        Ok(())
    }

    fn turn_resolved(&mut self, _snapshot: &GameSnapshot, _record: &TurnRecord) -> io::Result<()> {
        Ok(())
    }

    fn game_over(&mut self, _reason: EndReason, _leaderboard: &Leaderboard) -> io::Result<()> {
        Ok(())
    }
}

/// Shows nothing.
impl PresentationSink for () {}

/// Drives one match from settings to leaderboard.
pub struct Session<I, P> {
    config: MemoryConfig,
    input: I,
    sink: P,
    rng: GameRng,
}

impl<I: InputProvider, P: PresentationSink> Session<I, P> {
    pub fn new(config: MemoryConfig, input: I, sink: P, rng: GameRng) -> Self {
        Self {
            config,
            input,
            sink,
            rng,
        }
    }

    /// Announce the session, set up a game and play it to the end.
    pub fn run(&mut self) -> Result<Leaderboard, SessionError> {
        self.sink.session_started(&self.config)?;
        self.input.acknowledge()?;
        let mut game = self.setup()?;
        self.play(&mut game)
    }

    /// Collect roster and grid settings and deal a game.
    pub fn setup(&mut self) -> Result<Game, SessionError> {
        let roster = &self.config.roster;
        let count = self
            .input
            .read_roster_size(roster.min_players, roster.max_players)?;

        let mut names = Vec::with_capacity(count);
        for index in 1..=count {
            names.push(self.input.read_player_name(
                index,
                roster.min_name_length,
                roster.max_name_length,
            )?);
        }

        let (rows, cols) = self.input.read_grid_size(&self.config.grid)?;
        Ok(Game::setup(&self.config, names, rows, cols, &mut self.rng)?)
    }

    /// Play turns until the game is over and return the final standings.
    pub fn play(&mut self, game: &mut Game) -> Result<Leaderboard, SessionError> {
        let reason = loop {
            if let Some(reason) = game.end_reason() {
                break reason;
            }
            self.play_turn(game)?;
        };

        let leaderboard = game.leaderboard();
        self.sink.game_over(reason, &leaderboard)?;
        self.input.acknowledge()?;
        Ok(leaderboard)
    }

    fn play_turn(&mut self, game: &mut Game) -> Result<TurnRecord, SessionError> {
        self.sink.turn_started(&game.snapshot())?;

        while !matches!(game.phase(), TurnPhase::TurnResolution { .. }) {
            let coord = self
                .input
                .read_coordinate(game.grid().rows(), game.grid().cols())?;
            match game.guess(coord) {
                Ok(reveal) => self.sink.card_revealed(&game.snapshot(), &reveal)?,
                Err(err @ (TurnError::OutOfBounds { .. } | TurnError::EmptyCell(_))) => {
                    self.sink.guess_rejected(&err)?;
                }
                Err(err) => return Err(err.into()),
            }
        }

        let record = game.resolve()?;
        self.sink.turn_resolved(&game.snapshot(), &record)?;
        self.input.acknowledge()?;
        Ok(record)
    }

    #[must_use]
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Hand back the collaborators, e.g. to inspect what a sink recorded.
    pub fn into_parts(self) -> (I, P) {
        (self.input, self.sink)
    }
}
