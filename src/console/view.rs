//! Text presentation of the game state.

use crate::games::tictactoe::{Board, GameEvent, GameOutcome, Position, Seats, Square, WinLine};
use crate::scores::ScoreTuple;
use tracing::debug;

const WIN_MESSAGES: [&str; 4] = [
    "That's it!",
    "Nailed it!",
    "Beautiful finish!",
    "Well played, champ!",
];
const LOSS_MESSAGES: [&str; 4] = [
    "Almost... try again!",
    "The computer got you.",
    "Don't give up!",
    "Nice try!",
];
const TIE_MESSAGES: [&str; 3] = ["Tie!", "So close, tight game!", "Evenly matched!"];

/// Presentation state for the console game.
#[derive(Debug, Clone)]
pub struct ConsoleView {
    seats: Seats,
    status: String,
    highlight: Option<WinLine>,
}

impl ConsoleView {
    /// Creates a view for the given seats.
    pub fn new(seats: Seats) -> Self {
        Self {
            seats,
            status: String::new(),
            highlight: None,
        }
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Line to highlight, if the game was won.
    pub fn highlight(&self) -> Option<WinLine> {
        self.highlight
    }

    /// Updates the status for an event. `scores` already include a finished game.
    pub fn handle_event(&mut self, event: GameEvent, scores: ScoreTuple) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::Restarted {
                automated_moves_first,
            } => {
                self.highlight = None;
                self.status = if automated_moves_first {
                    "New game - the computer opens.".to_string()
                } else {
                    format!("New game - your move, place an {}!", self.seats.human())
                };
            }
            GameEvent::MoveApplied { position, mark } if mark == self.seats.opponent() => {
                self.status = format!(
                    "Computer played {}. Your move, place an {}!",
                    position.label(),
                    self.seats.human()
                );
            }
            GameEvent::MoveApplied { position, .. } => {
                self.status = format!("You played {}. Computer is thinking...", position.label());
            }
            GameEvent::GameEnded { outcome } => {
                self.highlight = outcome.line();
                let pick = scores.games() as usize;
                let (message, verdict) = match outcome {
                    GameOutcome::PlayerWin(_) => {
                        (WIN_MESSAGES[pick % WIN_MESSAGES.len()], "You win!")
                    }
                    GameOutcome::OpponentWin(_) => {
                        (LOSS_MESSAGES[pick % LOSS_MESSAGES.len()], "Computer wins.")
                    }
                    GameOutcome::Tie => (TIE_MESSAGES[pick % TIE_MESSAGES.len()], "It's a tie."),
                };
                self.status = format!(
                    "{} {}  [{}]  Press 'r' to play again.",
                    message, verdict, scores
                );
            }
        }
    }

    /// Renders the board, numbering empty cells and bracketing the winning line.
    pub fn render(&self, board: &Board) -> String {
        let mut rows = Vec::with_capacity(3);
        for row in Position::ALL.chunks(3) {
            let cells: Vec<String> = row
                .iter()
                .map(|pos| {
                    let symbol = match board.get(*pos) {
                        Square::Empty => (pos.to_index() + 1).to_string(),
                        Square::Occupied(mark) => mark.to_string(),
                    };
                    match self.highlight {
                        Some(line) if line.contains(*pos) => format!("[{}]", symbol),
                        _ => format!(" {} ", symbol),
                    }
                })
                .collect();
            rows.push(cells.join("|"));
        }
        rows.join("\n---+---+---\n")
    }
}
