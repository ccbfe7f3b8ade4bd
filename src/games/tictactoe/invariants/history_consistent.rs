//! History consistency invariant: history length matches occupied squares.

use super::super::rules::evaluate;
use super::super::{Board, GameRecord, Square};
use super::Invariant;

/// Invariant: Every occupied square has exactly one move, and no move was
/// played after the game had already ended.
pub struct HistoryConsistentInvariant;

impl Invariant<GameRecord> for HistoryConsistentInvariant {
    fn holds(record: &GameRecord) -> bool {
        let occupied = record
            .board()
            .squares()
            .iter()
            .filter(|s| **s != Square::Empty)
            .count();
        if occupied != record.history().len() {
            return false;
        }

        // Every prefix but the full history must still be in play.
        let mut replay = Board::new();
        for mov in record.history() {
            if evaluate(&replay).is_terminal() {
                return false;
            }
            replay.set(mov.position, Square::Occupied(mov.mark));
        }
        true
    }

    fn description() -> &'static str {
        "History length matches occupied squares and stops at the end of the game"
    }
}
