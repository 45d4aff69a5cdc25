//! Line-based keyboard input.

use std::io::{BufRead, Write};

use crate::core::config::GridConfig;
use crate::core::GameRng;
use crate::error::SessionError;
use crate::grid::{Coord, GridSize};
use crate::session::InputProvider;

/// Names handed out when a player leaves the name prompt blank.
const RANDOM_NAMES: &[&str] = &[
    "Ada", "Bruno", "Carla", "Dario", "Elena", "Fabio", "Giulia", "Ivo", "Lena", "Marco",
    "Nadia", "Oscar", "Paola", "Remo", "Sara", "Tino", "Ugo", "Vera", "Walter", "Zeno",
];

/// Reads answers from `reader`, writing prompts and complaints to `writer`.
///
/// Every prompt repeats until the answer is acceptable, so the session only
/// ever sees valid values. End of input surfaces as
/// [`SessionError::InputClosed`].
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
    names: GameRng,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    /// `names` drives the random names given to blank name answers.
    pub fn new(reader: R, writer: W, names: GameRng) -> Self {
        Self {
            reader,
            writer,
            names,
        }
    }

    fn read_line(&mut self) -> Result<String, SessionError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn prompt(&mut self, msg: &str) -> Result<String, SessionError> {
        write!(self.writer, "{msg}: ")?;
        self.writer.flush()?;
        self.read_line()
    }

    fn complain(&mut self, msg: &str) -> Result<(), SessionError> {
        writeln!(self.writer, "{msg}")?;
        Ok(())
    }

    fn read_int_in_range(&mut self, min: usize, max: usize) -> Result<usize, SessionError> {
        let msg = format!("Insert a number [{min}-{max}]");
        loop {
            match self.prompt(&msg)?.parse::<usize>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => self.complain("Number out of range")?,
                Err(_) => self.complain("Error, must be an integer")?,
            }
        }
    }

    fn random_name(&mut self, min_len: usize, max_len: usize) -> Option<String> {
        let fitting: Vec<&str> = RANDOM_NAMES
            .iter()
            .copied()
            .filter(|n| (min_len..=max_len).contains(&n.chars().count()))
            .collect();
        self.names.choose(&fitting).map(|n| n.to_string())
    }
}

impl<R: BufRead, W: Write> InputProvider for ConsoleInput<R, W> {
    fn read_roster_size(&mut self, min: usize, max: usize) -> Result<usize, SessionError> {
        writeln!(self.writer, "How many players?")?;
        self.read_int_in_range(min, max)
    }

    fn read_player_name(
        &mut self,
        index: usize,
        min_len: usize,
        max_len: usize,
    ) -> Result<String, SessionError> {
        let msg = format!("Insert player #{index} name [enter for random]");
        loop {
            let name = self.prompt(&msg)?;
            if name.is_empty() {
                if let Some(name) = self.random_name(min_len, max_len) {
                    writeln!(self.writer, "Player #{index} is {name}")?;
                    return Ok(name);
                }
            }
            if (min_len..=max_len).contains(&name.chars().count()) {
                return Ok(name);
            }
            self.complain(&format!(
                "Error: name must be between {min_len} and {max_len} characters."
            ))?;
        }
    }

    fn read_grid_size(&mut self, limits: &GridConfig) -> Result<(usize, usize), SessionError> {
        writeln!(
            self.writer,
            "Insert height and width of the grid such that:\n\
             - height * width >= 4\n\
             - height * width <= {}\n\
             - height * width is even",
            limits.max_cells
        )?;
        loop {
            writeln!(self.writer, "Height:")?;
            let rows = self.read_int_in_range(1, limits.max_cells)?;
            writeln!(self.writer, "Width:")?;
            let cols = self.read_int_in_range(1, (limits.max_cells / rows).max(1))?;
            match GridSize::new(rows, cols, limits) {
                Ok(size) => return Ok((size.rows(), size.cols())),
                Err(err) => self.complain(&err.to_string())?,
            }
        }
    }

    fn read_coordinate(&mut self, rows: usize, cols: usize) -> Result<Coord, SessionError> {
        writeln!(self.writer, "Insert row:")?;
        let row = self.read_int_in_range(1, rows)?;
        writeln!(self.writer, "Insert column:")?;
        let col = self.read_int_in_range(1, cols)?;
        Ok(Coord::new(row, col))
    }

    fn acknowledge(&mut self) -> Result<(), SessionError> {
        write!(self.writer, "Press enter to continue...")?;
        self.writer.flush()?;
        self.read_line().map(|_| ())
    }
}
