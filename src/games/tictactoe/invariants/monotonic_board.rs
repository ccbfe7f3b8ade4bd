//! Monotonic board invariant: squares never change once set.

use super::super::{Board, GameRecord, Square};
use super::Invariant;

/// Invariant: Board squares are monotonic (never overwritten).
///
/// Replaying the history onto an empty board must only ever fill empty
/// squares and must reproduce the current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<GameRecord> for MonotonicBoardInvariant {
    fn holds(record: &GameRecord) -> bool {
        let mut reconstructed = Board::new();

        for mov in record.history() {
            if !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.mark));
        }

        reconstructed == *record.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
