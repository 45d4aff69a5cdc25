//! The board: coordinates, validated sizes and the card grid.

mod board;
mod coord;

pub use board::{Grid, GridSize};
pub use coord::Coord;
