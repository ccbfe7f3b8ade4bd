//! Exhaustive check that the opponent never loses.
//!
//! Drives a [`TurnController`] through every legal human line, answering each
//! human move with the engine's reply, and tallies how the games end.

use super::controller::{Pacing, Seats, TurnController, TurnState};
use super::scheduler::QueuedScheduler;
use super::{GameOutcome, Position};
use crate::scores::{InMemoryScores, ScoreTracker, ScoreTuple};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

type AuditController = TurnController<QueuedScheduler, InMemoryScores>;

/// Plays out every human line against the engine.
///
/// Returns the tally over all complete games. A sound engine never lets
/// `player_wins` rise above zero.
#[instrument]
pub fn audit(seats: Seats, automated_moves_first: bool) -> ScoreTuple {
    // Events are not observed here.
    let (tx, _) = mpsc::unbounded_channel();
    let mut controller = TurnController::new(
        seats,
        Pacing::instant(),
        QueuedScheduler::new(),
        InMemoryScores::new(),
        tx,
    );
    controller.restart(automated_moves_first);

    let mut tally = ScoreTuple::default();
    explore(controller, &mut tally);
    info!(%tally, "Audit complete");
    tally
}

fn explore(mut controller: AuditController, tally: &mut ScoreTuple) {
    while let Some(ticket) = controller.scheduler_mut().pop() {
        controller.run_automated_move(ticket);
    }

    match controller.state() {
        TurnState::GameOver => {
            if let Some(outcome) = controller.outcome() {
                record(tally, &outcome, &controller);
            }
        }
        TurnState::HumanToMove => {
            for position in Position::valid_moves(controller.board()) {
                let mut branch = controller.clone();
                branch.submit_human_move(position.to_index());
                explore(branch, tally);
            }
        }
        // Every queued ticket was run above.
        TurnState::AutomatedToMove => {}
    }
}

fn record(tally: &mut ScoreTuple, outcome: &GameOutcome, controller: &AuditController) {
    if let GameOutcome::PlayerWin(_) = outcome {
        debug!(history = ?controller.history(), "Human line beats the engine");
    }
    debug_assert_eq!(controller.scores().current_tuple().games(), 1);
    tally.record(outcome);
}
