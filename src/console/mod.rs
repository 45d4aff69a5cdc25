//! Terminal front end: keyboard input and screen output for a [`Session`].
//!
//! [`Session`]: crate::session::Session

mod input;
mod render;

pub use input::ConsoleInput;
pub use render::{write_grid, ConsoleRenderer};
