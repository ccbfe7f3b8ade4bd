//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};

/// One of the 8 straight lines that win the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([Position; 3]);

impl WinLine {
    /// All winning lines: rows, then columns, then diagonals.
    pub const ALL: [WinLine; 8] = [
        // Rows
        WinLine([Position::TopLeft, Position::TopCenter, Position::TopRight]),
        WinLine([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
        WinLine([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
        // Columns
        WinLine([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
        WinLine([Position::TopCenter, Position::Center, Position::BottomCenter]),
        WinLine([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
        // Diagonals
        WinLine([Position::TopLeft, Position::Center, Position::BottomRight]),
        WinLine([Position::TopRight, Position::Center, Position::BottomLeft]),
    ];

    /// The three cells of this line.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// Checks if `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// Returns the mark filling all three cells, if any.
    pub fn owner(&self, board: &Board) -> Option<Mark> {
        let [a, b, c] = self.0;
        match board.get(a) {
            Square::Occupied(mark)
                if board.get(b) == board.get(a) && board.get(c) == board.get(a) =>
            {
                Some(mark)
            }
            _ => None,
        }
    }
}

/// Checks if there is a winner on the board.
///
/// Returns the first completed line in scan order with its mark.
pub fn check_winner(board: &Board) -> Option<(Mark, WinLine)> {
    WinLine::ALL
        .iter()
        .find_map(|line| line.owner(board).map(|mark| (mark, *line)))
}
