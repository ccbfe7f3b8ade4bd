//! Tic-tac-toe against an exhaustive minimax opponent.

mod action;
mod audit;
mod controller;
mod invariants;
mod outcome;
mod position;
mod record;
pub mod rules;
mod scheduler;
mod search;
mod types;

pub use action::{InvalidMove, Move};
pub use audit::audit;
pub use controller::{GameEvent, Pacing, Seats, Submission, TicketRun, TurnController, TurnState};
pub use invariants::{
    AlternatingTurnInvariant, GameRecordInvariants, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, MonotonicBoardInvariant,
};
pub use outcome::GameOutcome;
pub use position::Position;
pub use record::GameRecord;
pub use rules::{TerminalResult, WinLine, evaluate};
pub use scheduler::{MoveScheduler, MoveTicket, QueuedScheduler, TokioScheduler};
pub use search::{LOSS_SCORE, SearchEngine, SearchOutcome, Speculation, TIE_SCORE, WIN_SCORE};
pub use types::{Board, BoardParseError, Mark, Square};
