//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board): line detection and the
//! combined terminal evaluation used by both the turn controller and
//! the search.

pub mod terminal;
pub mod win;

pub use terminal::{TerminalResult, evaluate};
pub use win::WinLine;
