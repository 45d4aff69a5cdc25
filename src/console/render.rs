//! Terminal rendering of the grid, turns and standings.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use crate::cards::CardKind;
use crate::core::{MemoryConfig, Player, PlayerColor};
use crate::error::TurnError;
use crate::grid::Grid;
use crate::rules::{EndReason, GameSnapshot, Leaderboard, Reveal, TurnOutcome, TurnRecord};
use crate::session::PresentationSink;

const TITLE: &str = r"
    .--------.-----.--------.-----.----.--.--.
    |        |  -__|        |  _  |   _|  |  |
    |__|__|__|_____|__|__|__|_____|__| |___  |
                                       |_____|
";

/// Width reserved for row labels on the left of the grid.
const MARGIN: &str = "    ";

fn player_color(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Red => Color::Red,
        PlayerColor::Green => Color::Green,
        PlayerColor::Yellow => Color::Yellow,
        PlayerColor::Blue => Color::Blue,
        PlayerColor::Magenta => Color::Magenta,
        PlayerColor::Cyan => Color::Cyan,
        PlayerColor::White => Color::White,
    }
}

/// Draw `grid` with box-drawing borders and 1-based row/column labels.
///
/// Face-down cards show `!`; face-up cards show their symbol, colored by
/// kind. Resolved cells are blank.
pub fn write_grid(out: &mut impl Write, grid: &Grid) -> io::Result<()> {
    let cols = grid.cols();

    write!(out, "{MARGIN}")?;
    for col in 1..=cols {
        write!(out, " {col:>2} ")?;
    }
    writeln!(out)?;

    let border = |left: &str, mid: &str, right: &str| {
        let mut line = String::from(MARGIN);
        line.push_str(left);
        for col in 0..cols {
            line.push_str("───");
            line.push_str(if col + 1 == cols { right } else { mid });
        }
        line
    };

    for row in 1..=grid.rows() {
        let line = if row == 1 {
            border("┌", "┬", "┐")
        } else {
            border("├", "┼", "┤")
        };
        writeln!(out, "{line}")?;

        write!(out, "  {row:>2}│")?;
        for (_, card) in grid.iter().skip((row - 1) * cols).take(cols) {
            match card {
                Some(card) if card.is_face_up() => {
                    let color = match card.kind() {
                        CardKind::Bomb => Color::Red,
                        CardKind::Jolly => Color::Green,
                        CardKind::Normal => Color::Yellow,
                    };
                    write!(out, " {} ", card.symbol().to_string().with(color).bold())?;
                }
                Some(card) => write!(out, " {} ", card.visible_symbol())?,
                None => write!(out, "   ")?,
            }
            write!(out, "│")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{}", border("└", "┴", "┘"))
}

fn write_banner(out: &mut impl Write, player: &Player) -> io::Result<()> {
    let banner = format!("{}'s turn ({})", player.name(), player.score());
    writeln!(out, "{}", banner.on(player_color(player.color())))
}

/// Writes everything a match shows to a terminal.
pub struct ConsoleRenderer<W> {
    out: W,
    clear: bool,
}

impl<W: Write> ConsoleRenderer<W> {
    /// Render to a terminal, clearing the screen before each frame.
    pub fn new(out: W) -> Self {
        Self { out, clear: true }
    }

    /// Render as a plain scrolling log, without screen clearing.
    pub fn plain(out: W) -> Self {
        Self { out, clear: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn frame(&mut self, snapshot: &GameSnapshot) -> io::Result<()> {
        if self.clear {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        if let Some(player) = snapshot.active_player() {
            write_banner(&mut self.out, player)?;
        }
        write_grid(&mut self.out, &snapshot.grid)?;
        self.out.flush()
    }
}

impl<W: Write> PresentationSink for ConsoleRenderer<W> {
    fn session_started(&mut self, config: &MemoryConfig) -> io::Result<()> {
        if self.clear {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(self.out, "{}", TITLE.with(Color::Blue))?;
        writeln!(
            self.out,
            "{}-{} players, up to {} cards. Find the pairs, grab the jolly ({} points), avoid the bomb.",
            config.roster.min_players,
            config.roster.max_players,
            config.grid.max_cells,
            config.scoring.jolly_points
        )?;
        self.out.flush()
    }

    fn turn_started(&mut self, snapshot: &GameSnapshot) -> io::Result<()> {
        self.frame(snapshot)
    }

    fn card_revealed(&mut self, snapshot: &GameSnapshot, reveal: &Reveal) -> io::Result<()> {
        self.frame(snapshot)?;
        writeln!(self.out, "Revealed {} at {}", reveal.card.symbol(), reveal.coord)?;
        self.out.flush()
    }

    fn guess_rejected(&mut self, error: &TurnError) -> io::Result<()> {
        writeln!(self.out, "{}", error.to_string().with(Color::Red))?;
        self.out.flush()
    }

    fn turn_resolved(&mut self, _snapshot: &GameSnapshot, record: &TurnRecord) -> io::Result<()> {
        let message = match record.outcome {
            TurnOutcome::Eliminated => "BOOM!".with(Color::Red).bold(),
            TurnOutcome::Bonus { .. } => "JOLLY!".with(Color::Green).bold(),
            TurnOutcome::Matched { .. } => "MATCH!".with(Color::Yellow).bold(),
            TurnOutcome::Mismatched => "WRONG!".bold(),
        };
        writeln!(self.out, "{message}")?;
        if record.outcome.points() > 0 {
            writeln!(self.out, "+{} points", record.outcome.points())?;
        }
        self.out.flush()
    }

    fn game_over(&mut self, reason: EndReason, leaderboard: &Leaderboard) -> io::Result<()> {
        if self.clear {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(self.out, "{}", "GAME OVER".with(Color::Blue).bold())?;
        if reason == EndReason::AllEliminated {
            writeln!(self.out, "Nobody is left standing.")?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", "LEADERBOARD:".with(Color::Blue).bold())?;
        for (i, standing) in leaderboard.iter().enumerate() {
            let row = format!("{:<15} {:>2}", standing.name, standing.score);
            write!(self.out, "{}", row.on(player_color(standing.color)))?;
            if i == 0 {
                write!(self.out, " {}", "♛".with(Color::Yellow))?;
            }
            if !standing.alive {
                write!(self.out, " (eliminated)")?;
            }
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}
