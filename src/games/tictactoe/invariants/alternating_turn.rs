//! Alternating turn invariant: marks alternate X, O, X, ... or O, X, O, ...

use super::super::GameRecord;
use super::Invariant;

/// Invariant: Marks alternate in the history.
///
/// Either side may open, so only consecutive moves are compared.
pub struct AlternatingTurnInvariant;

impl Invariant<GameRecord> for AlternatingTurnInvariant {
    fn holds(record: &GameRecord) -> bool {
        record
            .history()
            .windows(2)
            .all(|pair| pair[0].mark != pair[1].mark)
    }

    fn description() -> &'static str {
        "Marks alternate turns"
    }
}
