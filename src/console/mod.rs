//! Terminal game driven by stdin.
//!
//! Human commands and delivered move tickets are multiplexed with
//! `tokio::select!`; game events are drained into a [`ConsoleView`] after
//! each step and the board is reprinted when anything changed.

mod input;
mod view;

pub use input::{ConsoleCommand, HELP, parse_command};
pub use view::ConsoleView;

use crate::config::GameConfig;
use crate::games::tictactoe::{GameEvent, TokioScheduler, TurnController};
use crate::scores::{InMemoryScores, JsonScoreFile, ScoreTracker};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Runs the interactive game until the player quits or stdin closes.
#[instrument(skip(config))]
pub async fn run_console(config: GameConfig) -> Result<()> {
    let scores: Box<dyn ScoreTracker> = match config.score_file() {
        Some(path) => Box::new(
            JsonScoreFile::open(path)
                .with_context(|| format!("Failed to open score file {}", path.display()))?,
        ),
        None => Box::new(InMemoryScores::new()),
    };

    let (scheduler, mut tickets) = TokioScheduler::channel();
    let (event_tx, mut events) = mpsc::unbounded_channel::<GameEvent>();
    let mut controller =
        TurnController::new(config.seats(), config.pacing(), scheduler, scores, event_tx);
    let mut view = ConsoleView::new(config.seats());
    let mut automated_first = *config.automated_moves_first();

    info!(automated_first, "Starting console game");
    println!("{}", HELP);
    controller.restart(automated_first);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let mut changed = false;
        while let Ok(event) = events.try_recv() {
            view.handle_event(event, controller.scores().current_tuple());
            changed = true;
        }
        if changed {
            println!("\n{}\n\n{}", view.render(controller.board()), view.status());
        }

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    debug!("stdin closed");
                    break;
                };

                match parse_command(&line) {
                    ConsoleCommand::Cell(index) => {
                        // Rejected moves are ignored on purpose.
                        let _ = controller.submit_human_move(index);
                    }
                    ConsoleCommand::Restart => controller.restart(automated_first),
                    ConsoleCommand::ToggleFirst => {
                        automated_first = !automated_first;
                        let who = if automated_first { "The computer" } else { "You" };
                        println!("{} will open the next game.", who);
                    }
                    ConsoleCommand::Help => println!("{}", HELP),
                    ConsoleCommand::Quit => break,
                    ConsoleCommand::Unknown(text) => {
                        debug!(%text, "Unknown command");
                        println!("{}", HELP);
                    }
                }
            }
            Some(ticket) = tickets.recv() => {
                controller.run_automated_move(ticket);
            }
        }
    }

    println!("Final score: {}", controller.scores().current_tuple());
    Ok(())
}
