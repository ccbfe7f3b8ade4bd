//! Turn sequencing between the human and the automated opponent.
//!
//! [`TurnController`] owns the board of one game session. Human input arrives
//! through [`TurnController::submit_human_move`]; when the opponent should
//! reply, the controller hands a [`MoveTicket`] to its [`MoveScheduler`] and
//! applies the reply when the ticket comes back through
//! [`TurnController::run_automated_move`]. Every restart starts a new
//! generation, so tickets issued for an abandoned game are dropped.
//!
//! Invalid input is ignored: the controller logs it and returns
//! [`Submission::Rejected`], but board and turn state stay exactly as they
//! were.

use super::action::{InvalidMove, Move};
use super::invariants::{GameRecordInvariants, InvariantSet};
use super::outcome::GameOutcome;
use super::record::GameRecord;
use super::rules::{TerminalResult, evaluate};
use super::scheduler::{MoveScheduler, MoveTicket};
use super::search::SearchEngine;
use super::{Board, Mark, Position};
use crate::scores::ScoreTracker;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, trace, warn};

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for the human.
    HumanToMove,
    /// An automated move is scheduled.
    AutomatedToMove,
    /// The game has ended; only a restart leaves this state.
    GameOver,
}

/// Which mark each side plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats {
    human: Mark,
}

impl Seats {
    /// Seats the human at `human`; the opponent takes the other mark.
    pub fn new(human: Mark) -> Self {
        Self { human }
    }

    /// The human's mark.
    pub fn human(&self) -> Mark {
        self.human
    }

    /// The automated opponent's mark.
    pub fn opponent(&self) -> Mark {
        self.human.other()
    }
}

impl Default for Seats {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}

/// Pauses before automated moves. Purely cosmetic; zero is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct Pacing {
    /// Pause between a human move and the opponent's reply.
    reply_delay: Duration,
    /// Pause between a restart and the opponent's opening move.
    opening_delay: Duration,
}

impl Pacing {
    /// No pauses at all.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(Duration::from_millis(280), Duration::from_millis(350))
    }
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A mark was placed.
    MoveApplied {
        /// Where the mark went.
        position: Position,
        /// The mark placed.
        mark: Mark,
    },
    /// The game is over.
    GameEnded {
        /// Result, including the line to highlight.
        outcome: GameOutcome,
    },
    /// The board was cleared for a new game.
    Restarted {
        /// Whether the opponent opens the new game.
        automated_moves_first: bool,
    },
}

/// What happened to a submitted human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The move was applied.
    Accepted,
    /// The move was ignored; nothing changed.
    Rejected(InvalidMove),
}

/// What happened to a delivered ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketRun {
    /// The opponent played here.
    Played(Position),
    /// The ticket belongs to a game that has since been restarted.
    Stale,
    /// The ticket is current but no automated move is due.
    OutOfTurn,
}

/// State machine for one game session.
#[derive(Debug, Clone)]
pub struct TurnController<S, T> {
    record: GameRecord,
    state: TurnState,
    outcome: Option<GameOutcome>,
    seats: Seats,
    engine: SearchEngine,
    pacing: Pacing,
    generation: u64,
    scheduler: S,
    scores: T,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl<S, T> TurnController<S, T>
where
    S: MoveScheduler,
    T: ScoreTracker,
{
    /// Creates a controller with an empty board and the human to move.
    ///
    /// Call [`TurnController::restart`] with `true` to let the opponent open.
    #[instrument(skip(scheduler, scores, events))]
    pub fn new(
        seats: Seats,
        pacing: Pacing,
        scheduler: S,
        scores: T,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        info!(human = %seats.human(), opponent = %seats.opponent(), "Creating turn controller");
        Self {
            record: GameRecord::new(),
            state: TurnState::HumanToMove,
            outcome: None,
            seats,
            engine: SearchEngine::new(seats.opponent()),
            pacing,
            generation: 0,
            scheduler,
            scores,
            events,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.record.board()
    }

    /// Returns the moves of the current game.
    pub fn history(&self) -> &[Move] {
        self.record.history()
    }

    /// Returns whose turn it is.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Returns the outcome once the game is over.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Returns the seat assignment.
    pub fn seats(&self) -> Seats {
        self.seats
    }

    /// Returns the current game generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the score tracker.
    pub fn scores(&self) -> &T {
        &self.scores
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Returns the scheduler mutably (to pop queued tickets).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Plays the human's mark at `index` (0-8).
    ///
    /// Ignored when the index is out of range, the square is taken, or it is
    /// not the human's turn. Otherwise the move is applied and checked, and
    /// only then is the opponent's reply scheduled.
    #[instrument(skip(self), fields(generation = self.generation, state = ?self.state))]
    pub fn submit_human_move(&mut self, index: usize) -> Submission {
        let Some(position) = Position::from_index(index) else {
            return self.reject(InvalidMove::OutOfRange(index));
        };

        match self.state {
            TurnState::HumanToMove => {}
            TurnState::AutomatedToMove => return self.reject(InvalidMove::NotHumansTurn),
            TurnState::GameOver => return self.reject(InvalidMove::GameOver),
        }

        if !self.board().is_empty(position) {
            return self.reject(InvalidMove::SquareOccupied(position));
        }

        let ended = self.apply_move_and_check_terminal(Move::new(self.seats.human(), position));
        if !ended {
            self.state = TurnState::AutomatedToMove;
            let ticket = MoveTicket::new(self.generation);
            self.scheduler.schedule(self.pacing.reply_delay, ticket);
            debug!(generation = self.generation, "Opponent reply scheduled");
        }

        Submission::Accepted
    }

    /// Runs the opponent's move for a delivered ticket.
    ///
    /// Tickets from an earlier generation are dropped without touching the
    /// board.
    #[instrument(skip(self), fields(generation = self.generation, state = ?self.state))]
    pub fn run_automated_move(&mut self, ticket: MoveTicket) -> TicketRun {
        if ticket.generation() != self.generation {
            debug!(ticket = ticket.generation(), "Dropping stale ticket");
            return TicketRun::Stale;
        }

        if self.state != TurnState::AutomatedToMove {
            debug!("No automated move due");
            return TicketRun::OutOfTurn;
        }

        let Some(position) = self.engine.choose_move(self.board()) else {
            warn!(board = %self.board(), "Opponent found no move on a live board");
            return TicketRun::OutOfTurn;
        };

        let ended = self.apply_move_and_check_terminal(Move::new(self.seats.opponent(), position));
        if !ended {
            self.state = TurnState::HumanToMove;
        }

        TicketRun::Played(position)
    }

    /// Clears the board and starts a new game generation.
    ///
    /// When `automated_moves_first` is set the opponent's opening move is
    /// scheduled right away.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn restart(&mut self, automated_moves_first: bool) {
        self.generation += 1;
        self.record.reset();
        self.outcome = None;
        self.emit(GameEvent::Restarted {
            automated_moves_first,
        });

        if automated_moves_first {
            self.state = TurnState::AutomatedToMove;
            let ticket = MoveTicket::new(self.generation);
            self.scheduler.schedule(self.pacing.opening_delay, ticket);
        } else {
            self.state = TurnState::HumanToMove;
        }

        info!(generation = self.generation, state = ?self.state, "Game restarted");
    }

    /// Places the move, reports it, and ends the game if it was decisive.
    ///
    /// Returns true when the game is over.
    fn apply_move_and_check_terminal(&mut self, action: Move) -> bool {
        self.record.apply(action);
        debug!(%action, "Move applied");
        self.emit(GameEvent::MoveApplied {
            position: action.position,
            mark: action.mark,
        });

        debug_assert!(
            GameRecordInvariants::check_all(&self.record).is_ok(),
            "Game record invariants violated"
        );

        let outcome = match evaluate(self.board()) {
            TerminalResult::NoResult => return false,
            TerminalResult::Win { mark, line } if mark == self.seats.human() => {
                GameOutcome::PlayerWin(line)
            }
            TerminalResult::Win { line, .. } => GameOutcome::OpponentWin(line),
            TerminalResult::Tie => GameOutcome::Tie,
        };

        self.state = TurnState::GameOver;
        self.outcome = Some(outcome);
        self.scores.increment(&outcome);
        info!(%outcome, scores = %self.scores.current_tuple(), "Game over");
        self.emit(GameEvent::GameEnded { outcome });
        true
    }

    fn reject(&self, reason: InvalidMove) -> Submission {
        debug!(%reason, "Ignoring human move");
        Submission::Rejected(reason)
    }

    fn emit(&self, event: GameEvent) {
        if self.events.send(event).is_err() {
            trace!(?event, "No listener for game event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::QueuedScheduler;
    use crate::scores::InMemoryScores;

    type Controller = TurnController<QueuedScheduler, InMemoryScores>;

    fn controller() -> (Controller, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = TurnController::new(
            Seats::default(),
            Pacing::default(),
            QueuedScheduler::new(),
            InMemoryScores::new(),
            tx,
        );
        (controller, rx)
    }

    #[test]
    fn test_reply_is_scheduled_after_human_move() {
        let (mut game, mut rx) = controller();
        assert_eq!(game.submit_human_move(0), Submission::Accepted);
        assert_eq!(game.state(), TurnState::AutomatedToMove);
        assert_eq!(game.scheduler().delays(), vec![Duration::from_millis(280)]);
        assert_eq!(
            rx.try_recv().ok(),
            Some(GameEvent::MoveApplied {
                position: Position::TopLeft,
                mark: Mark::X
            })
        );
    }

    #[test]
    fn test_ticket_runs_only_once() {
        let (mut game, _rx) = controller();
        game.submit_human_move(0);
        let ticket = game.scheduler_mut().pop().unwrap();

        assert_eq!(game.run_automated_move(ticket), TicketRun::Played(Position::Center));
        assert_eq!(game.state(), TurnState::HumanToMove);
        assert_eq!(game.run_automated_move(ticket), TicketRun::OutOfTurn);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_opening_uses_opening_delay() {
        let (mut game, _rx) = controller();
        game.restart(true);
        assert_eq!(game.scheduler().delays(), vec![Duration::from_millis(350)]);
    }

    #[test]
    fn test_human_may_play_o() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut game = TurnController::new(
            Seats::new(Mark::O),
            Pacing::instant(),
            QueuedScheduler::new(),
            InMemoryScores::new(),
            tx,
        );
        game.restart(true);
        let ticket = game.scheduler_mut().pop().unwrap();
        game.run_automated_move(ticket);

        assert_eq!(game.board().get(Position::Center), super::super::Square::Occupied(Mark::X));
        assert_eq!(game.submit_human_move(0), Submission::Accepted);
        assert_eq!(game.history()[1].mark, Mark::O);
    }
}
