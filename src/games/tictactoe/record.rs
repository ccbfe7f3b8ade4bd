//! Board plus the ordered list of moves that produced it.

use super::action::Move;
use super::{Board, Square};

/// The board of one game together with its move history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    pub(super) board: Board,
    pub(super) history: Vec<Move>,
}

impl GameRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Places the move's mark and appends it to the history.
    ///
    /// Callers check that the square is empty first.
    pub(super) fn apply(&mut self, action: Move) {
        debug_assert!(self.board.is_empty(action.position));
        self.board.set(action.position, Square::Occupied(action.mark));
        self.history.push(action);
    }

    /// Clears board and history.
    pub(super) fn reset(&mut self) {
        *self = Self::new();
    }
}
