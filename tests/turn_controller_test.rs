//! Tests for turn sequencing, move legality and game endings.

use std::time::Duration;
use strictly_minimax::{
    GameEvent, GameOutcome, InMemoryScores, InvalidMove, Mark, Pacing, Position, QueuedScheduler,
    ScoreTracker, Seats, Square, Submission, TicketRun, TurnController, TurnState, WinLine,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};

type Controller = TurnController<QueuedScheduler, InMemoryScores>;

fn controller() -> (Controller, UnboundedReceiver<GameEvent>) {
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

fn drain(rx: &mut UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Plays `index` for the human and runs the reply it schedules.
fn play(controller: &mut Controller, index: usize) -> Option<TicketRun> {
    assert_eq!(controller.submit_human_move(index), Submission::Accepted);
    controller
        .scheduler_mut()
        .pop()
        .map(|ticket| controller.run_automated_move(ticket))
}

#[test]
fn test_opponent_opens_in_the_center() {
    let (mut controller, mut rx) = controller();
    controller.restart(true);

    assert_eq!(controller.state(), TurnState::AutomatedToMove);
    assert_eq!(controller.scheduler().delays(), vec![Duration::from_millis(350)]);

    let ticket = controller.scheduler_mut().pop().unwrap();
    assert_eq!(
        controller.run_automated_move(ticket),
        TicketRun::Played(Position::Center)
    );
    assert_eq!(controller.board().to_string(), "....O....");
    assert_eq!(controller.state(), TurnState::HumanToMove);

    assert_eq!(
        drain(&mut rx),
        vec![
            GameEvent::Restarted {
                automated_moves_first: true
            },
            GameEvent::MoveApplied {
                position: Position::Center,
                mark: Mark::O
            },
        ]
    );
}

#[test]
fn test_human_move_schedules_reply() {
    let (mut controller, _rx) = controller();

    assert_eq!(controller.submit_human_move(0), Submission::Accepted);
    assert_eq!(controller.state(), TurnState::AutomatedToMove);
    assert_eq!(controller.board().get(Position::TopLeft), Square::Occupied(Mark::X));
    assert_eq!(controller.scheduler().delays(), vec![Duration::from_millis(280)]);

    let ticket = controller.scheduler_mut().pop().unwrap();
    assert_eq!(
        controller.run_automated_move(ticket),
        TicketRun::Played(Position::Center)
    );
    assert_eq!(controller.state(), TurnState::HumanToMove);
    assert_eq!(controller.history().len(), 2);
}

#[test]
fn test_illegal_moves_are_rejected_without_changes() {
    let (mut controller, mut rx) = controller();
    play(&mut controller, 0);
    drain(&mut rx);

    let before = controller.board().clone();
    assert_eq!(
        controller.submit_human_move(9),
        Submission::Rejected(InvalidMove::OutOfRange(9))
    );
    assert_eq!(
        controller.submit_human_move(4),
        Submission::Rejected(InvalidMove::SquareOccupied(Position::Center))
    );
    assert_eq!(controller.board(), &before);
    assert_eq!(controller.state(), TurnState::HumanToMove);
    assert!(controller.scheduler().is_empty());
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_human_cannot_move_during_opponents_turn() {
    let (mut controller, _rx) = controller();
    controller.submit_human_move(0);

    assert_eq!(
        controller.submit_human_move(8),
        Submission::Rejected(InvalidMove::NotHumansTurn)
    );
    assert_eq!(controller.board().count(Mark::X), 1);
    assert_eq!(controller.scheduler().len(), 1);
}

#[test]
fn test_opponent_wins_when_human_blunders() {
    let (mut controller, mut rx) = controller();

    play(&mut controller, 0);
    play(&mut controller, 1);
    let last = play(&mut controller, 3);

    assert_eq!(last, Some(TicketRun::Played(Position::BottomLeft)));
    assert_eq!(controller.board().to_string(), "XXOXO.O..");
    assert_eq!(controller.state(), TurnState::GameOver);

    let line = WinLine::ALL[7];
    assert_eq!(controller.outcome(), Some(GameOutcome::OpponentWin(line)));
    assert_eq!(*controller.scores().current_tuple().opponent_wins(), 1);
    assert_eq!(controller.scores().current_tuple().games(), 1);

    let events = drain(&mut rx);
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameEnded {
            outcome: GameOutcome::OpponentWin(line)
        })
    );
}

#[test]
fn test_full_board_without_line_is_a_tie() {
    let (mut controller, _rx) = controller();

    for index in [4, 8, 1, 3] {
        assert!(matches!(
            play(&mut controller, index),
            Some(TicketRun::Played(_))
        ));
    }
    assert_eq!(controller.submit_human_move(6), Submission::Accepted);

    assert_eq!(controller.board().to_string(), "OXOXXOXOX");
    assert_eq!(controller.outcome(), Some(GameOutcome::Tie));
    assert_eq!(controller.state(), TurnState::GameOver);
    assert!(controller.scheduler().is_empty());
    assert_eq!(*controller.scores().current_tuple().ties(), 1);

    let full = controller.board().clone();
    assert_eq!(
        controller.submit_human_move(0),
        Submission::Rejected(InvalidMove::GameOver)
    );
    assert_eq!(controller.board(), &full);
    assert_eq!(controller.state(), TurnState::GameOver);
}

#[test]
fn test_moves_after_game_over_are_rejected() {
    let (mut controller, mut rx) = controller();
    for index in [0, 1, 3] {
        play(&mut controller, index);
    }
    drain(&mut rx);
    let before = controller.board().clone();

    assert_eq!(
        controller.submit_human_move(5),
        Submission::Rejected(InvalidMove::GameOver)
    );
    assert_eq!(controller.board(), &before);
    assert!(drain(&mut rx).is_empty());
    assert_eq!(controller.scores().current_tuple().games(), 1);
}

#[test]
fn test_restart_drops_pending_reply() {
    let (mut controller, _rx) = controller();
    controller.submit_human_move(0);
    let stale = controller.scheduler_mut().pop().unwrap();

    controller.restart(false);
    assert_eq!(controller.run_automated_move(stale), TicketRun::Stale);
    assert!(controller.board().is_blank());
    assert_eq!(controller.state(), TurnState::HumanToMove);
}

#[test]
fn test_double_restart_plays_one_opening() {
    let (mut controller, _rx) = controller();
    controller.restart(true);
    controller.restart(true);

    let first = controller.scheduler_mut().pop().unwrap();
    let second = controller.scheduler_mut().pop().unwrap();
    assert_eq!(controller.run_automated_move(first), TicketRun::Stale);
    assert_eq!(
        controller.run_automated_move(second),
        TicketRun::Played(Position::Center)
    );
    assert_eq!(controller.board().count(Mark::O), 1);
}

#[test]
fn test_restart_is_idempotent_for_the_board() {
    let (mut controller, _rx) = controller();
    play(&mut controller, 0);

    controller.restart(false);
    let once = (controller.board().clone(), controller.state());
    controller.restart(false);

    assert_eq!((controller.board().clone(), controller.state()), once);
    assert!(controller.history().is_empty());
    assert_eq!(controller.outcome(), None);
}

#[test]
fn test_ticket_without_a_due_move_is_ignored() {
    let (mut controller, _rx) = controller();
    controller.submit_human_move(0);
    let ticket = controller.scheduler_mut().pop().unwrap();

    assert!(matches!(
        controller.run_automated_move(ticket),
        TicketRun::Played(_)
    ));
    assert_eq!(controller.run_automated_move(ticket), TicketRun::OutOfTurn);
    assert_eq!(controller.board().count(Mark::O), 1);
}

#[test]
fn test_scores_accumulate_across_games() {
    let (mut controller, _rx) = controller();
    for _ in 0..2 {
        for index in [0, 1, 3] {
            play(&mut controller, index);
        }
        controller.restart(false);
    }
    assert_eq!(*controller.scores().current_tuple().opponent_wins(), 2);
}

#[test]
fn test_human_can_play_o() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut controller = TurnController::new(
        Seats::new(Mark::O),
        Pacing::instant(),
        QueuedScheduler::new(),
        InMemoryScores::new(),
        tx,
    );
    controller.restart(true);
    let ticket = controller.scheduler_mut().pop().unwrap();
    controller.run_automated_move(ticket);

    assert_eq!(controller.board().get(Position::Center), Square::Occupied(Mark::X));
    assert_eq!(controller.submit_human_move(0), Submission::Accepted);
    assert_eq!(controller.board().get(Position::TopLeft), Square::Occupied(Mark::O));
    assert_eq!(controller.scheduler().delays(), vec![Duration::ZERO]);
}
