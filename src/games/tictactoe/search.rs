//! Exhaustive minimax search for the automated opponent.
//!
//! The game tree is small enough to search to the end on every move, so there
//! is no pruning, no transposition table and no depth discount. Scores are
//! always seen from the automated side: a forced win is [`WIN_SCORE`], a
//! forced loss [`LOSS_SCORE`], anything else [`TIE_SCORE`]. Because wins are
//! not discounted by depth, the engine is indifferent between winning now and
//! winning later; among equal scores it only prefers the lowest cell index.

use super::rules::{TerminalResult, evaluate};
use super::{Board, Mark, Position, Square};
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Score of a board the automated side has won.
pub const WIN_SCORE: i32 = 10;
/// Score of a drawn board.
pub const TIE_SCORE: i32 = 0;
/// Score of a board the human has won.
pub const LOSS_SCORE: i32 = -10;

/// Best move found for a board and its game-theoretic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The chosen cell. `None` only when the board is already terminal.
    pub position: Option<Position>,
    /// Value of the board for the automated side.
    pub score: i32,
}

impl SearchOutcome {
    fn leaf(score: i32) -> Self {
        Self {
            position: None,
            score,
        }
    }
}

/// A mark placed on a borrowed board for the duration of one search branch.
///
/// The square is cleared again when the guard drops, whichever way the
/// branch exits.
pub struct Speculation<'a> {
    board: &'a mut Board,
    position: Position,
}

impl<'a> Speculation<'a> {
    /// Places `mark` at the empty square `position`.
    pub fn place(board: &'a mut Board, position: Position, mark: Mark) -> Self {
        debug_assert!(board.is_empty(position), "speculating on an occupied square");
        board.set(position, Square::Occupied(mark));
        Self { board, position }
    }
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Speculation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        self.board.set(self.position, Square::Empty);
    }
}

/// Minimax engine playing `automaton`'s mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchEngine {
    automaton: Mark,
}

impl SearchEngine {
    /// Creates an engine that maximizes for `automaton`.
    pub fn new(automaton: Mark) -> Self {
        Self { automaton }
    }

    /// The mark this engine plays.
    pub fn automaton(&self) -> Mark {
        self.automaton
    }

    /// Chooses the automated side's next move.
    ///
    /// A blank board is answered with the center without searching; every
    /// other board goes through [`SearchEngine::best_move`]. Returns `None`
    /// when the board is already terminal.
    #[instrument(skip(self, board), fields(board = %board, automaton = %self.automaton))]
    pub fn choose_move(&self, board: &Board) -> Option<Position> {
        if board.is_blank() {
            debug!("Blank board, opening in the center");
            return Some(Position::Center);
        }

        let mut scratch = board.clone();
        let outcome = self.best_move(&mut scratch, self.automaton);
        debug!(position = ?outcome.position, score = outcome.score, "Search complete");
        outcome.position
    }

    /// Searches the full game tree below `board` with `side` to move.
    ///
    /// `board` is only borrowed for speculative placements and is returned
    /// unchanged.
    pub fn best_move(&self, board: &mut Board, side: Mark) -> SearchOutcome {
        match evaluate(board) {
            TerminalResult::Win { mark, .. } if mark == self.automaton => {
                return SearchOutcome::leaf(WIN_SCORE);
            }
            TerminalResult::Win { .. } => return SearchOutcome::leaf(LOSS_SCORE),
            TerminalResult::Tie => return SearchOutcome::leaf(TIE_SCORE),
            TerminalResult::NoResult => {}
        }

        let maximizing = side == self.automaton;
        let mut best: Option<(Position, i32)> = None;

        for position in Position::valid_moves(board) {
            let score = {
                let mut branch = Speculation::place(board, position, side);
                self.best_move(&mut branch, side.other()).score
            };

            // Strict comparison keeps the earliest (lowest index) candidate on ties.
            let improves = match best {
                None => true,
                Some((_, current)) if maximizing => score > current,
                Some((_, current)) => score < current,
            };
            if improves {
                best = Some((position, score));
            }
        }

        match best {
            Some((position, score)) => SearchOutcome {
                position: Some(position),
                score,
            },
            // Unreachable for a non-terminal board, which always has an empty square.
            None => SearchOutcome::leaf(TIE_SCORE),
        }
    }
}
