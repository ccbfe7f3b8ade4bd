//! Outcome of a finished game, seen from the human's seat.

use super::rules::WinLine;
use serde::{Deserialize, Serialize};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The human completed `line`.
    PlayerWin(WinLine),
    /// The automated opponent completed `line`.
    OpponentWin(WinLine),
    /// Full board, no line.
    Tie,
}

impl GameOutcome {
    /// The line to highlight, if the game was won.
    pub fn line(&self) -> Option<WinLine> {
        match self {
            GameOutcome::PlayerWin(line) | GameOutcome::OpponentWin(line) => Some(*line),
            GameOutcome::Tie => None,
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::PlayerWin(_) => write!(f, "You win"),
            GameOutcome::OpponentWin(_) => write!(f, "Computer wins"),
            GameOutcome::Tie => write!(f, "Tie"),
        }
    }
}
