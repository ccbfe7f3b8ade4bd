//! Terminal-state evaluation.

use super::super::{Board, Mark};
use super::win::{WinLine, check_winner};
use serde::{Deserialize, Serialize};

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalResult {
    /// Play continues.
    NoResult,
    /// `mark` completed `line`.
    Win {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        line: WinLine,
    },
    /// The board is full and no line is complete.
    Tie,
}

impl TerminalResult {
    /// Returns true unless play continues.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TerminalResult::NoResult)
    }
}

/// Evaluates the board.
///
/// Lines are scanned rows, columns, diagonals. Legal play never completes
/// lines for both marks, so the first completed line decides the winner.
pub fn evaluate(board: &Board) -> TerminalResult {
    if let Some((mark, line)) = check_winner(board) {
        TerminalResult::Win { mark, line }
    } else if board.is_full() {
        TerminalResult::Tie
    } else {
        TerminalResult::NoResult
    }
}
