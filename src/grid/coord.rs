//! 1-based grid coordinates.

use serde::{Deserialize, Serialize};

/// A cell position as players name it: row and column both start at 1.
///
/// The grid converts to 0-based storage indices internally. Coordinates
/// order row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this coordinate lies inside a `rows x cols` grid.
    #[must_use]
    pub fn in_bounds(self, rows: usize, cols: usize) -> bool {
        (1..=rows).contains(&self.row) && (1..=cols).contains(&self.col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
