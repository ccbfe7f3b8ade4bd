//! Strictly Minimax - tic-tac-toe against an opponent that never loses.
//!
//! # Architecture
//!
//! - **Rules**: pure board evaluation (win lines, ties)
//! - **Search**: exhaustive minimax with deterministic tie-breaking
//! - **Controller**: turn state machine with a pluggable move scheduler
//! - **Scores**: win/loss/tie counters, in memory or as a JSON file
//! - **Console**: a stdin-driven terminal game
//!
//! # Example
//!
//! ```
//! use strictly_minimax::{
//!     InMemoryScores, Pacing, QueuedScheduler, Seats, TurnController, TurnState,
//! };
//! use tokio::sync::mpsc;
//!
//! let (tx, _rx) = mpsc::unbounded_channel();
//! let mut game = TurnController::new(
//!     Seats::default(),
//!     Pacing::instant(),
//!     QueuedScheduler::new(),
//!     InMemoryScores::new(),
//!     tx,
//! );
//!
//! game.submit_human_move(0);
//! let ticket = game.scheduler_mut().pop().unwrap();
//! game.run_automated_move(ticket);
//! assert_eq!(game.state(), TurnState::HumanToMove);
//! ```

#![warn(missing_docs)]

// Private module declarations
mod cli;
mod config;
mod console;
mod games;
mod scores;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Console game
pub use console::{ConsoleCommand, ConsoleView, parse_command, run_console};

// Crate-level exports - Scores
pub use scores::{InMemoryScores, JsonScoreFile, ScoreError, ScoreTracker, ScoreTuple};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    AlternatingTurnInvariant, Board, BoardParseError, GameEvent, GameOutcome, GameRecord,
    GameRecordInvariants, HistoryConsistentInvariant, InvalidMove, Invariant, InvariantSet,
    InvariantViolation, LOSS_SCORE, Mark, MonotonicBoardInvariant, Move, MoveScheduler,
    MoveTicket, Pacing, Position, QueuedScheduler, SearchEngine, SearchOutcome, Seats,
    Speculation, Square, Submission, TIE_SCORE, TerminalResult, TicketRun, TokioScheduler,
    TurnController, TurnState, WIN_SCORE, WinLine, audit, evaluate,
};
