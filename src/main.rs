//! Strictly Minimax - Unified CLI
//!
//! Play tic-tac-toe against the minimax opponent, or inspect the engine.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use strictly_minimax::{
    Board, Cli, Command, GameConfig, JsonScoreFile, Mark, ScoreTracker, SearchEngine, Seats, audit,
    evaluate, run_console,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            computer_first,
            mark,
            no_delay,
            score_file,
        } => run_play(&cli.config, computer_first, mark, no_delay, score_file).await,
        Command::BestMove {
            board,
            to_move,
            engine,
        } => run_best_move(&board, to_move, engine),
        Command::Audit { mark } => run_audit(mark),
        Command::Scores { score_file } => run_scores(&cli.config, score_file),
    }
}

/// Run the interactive terminal game
#[instrument(skip(config_path))]
async fn run_play(
    config_path: &Path,
    computer_first: bool,
    mark: Option<Mark>,
    no_delay: bool,
    score_file: Option<std::path::PathBuf>,
) -> Result<()> {
    let mut config = GameConfig::load_or_default(config_path)?;

    if computer_first {
        config = config.with_automated_moves_first(true);
    }
    if let Some(mark) = mark {
        config = config.with_human_mark(mark);
    }
    if no_delay {
        config = config.without_delays();
    }
    if let Some(path) = score_file {
        config = config.with_score_file(path);
    }

    run_console(config).await
}

/// Search a single position
#[instrument]
fn run_best_move(board: &str, to_move: Mark, engine: Option<Mark>) -> Result<()> {
    let mut board: Board = board.parse().context("Invalid --board")?;
    let engine = SearchEngine::new(engine.unwrap_or(to_move));

    info!(board = %board, %to_move, "Searching position");
    let outcome = engine.best_move(&mut board, to_move);

    println!("{}\n", board.display());
    println!("Result:    {:?}", evaluate(&board));
    match outcome.position {
        Some(position) => println!(
            "Best move: {} (cell {}) for {}",
            position,
            position.to_index() + 1,
            to_move
        ),
        None => println!("Best move: none, the game is over"),
    }
    println!("Score:     {} for {}", outcome.score, engine.automaton());
    Ok(())
}

/// Exhaustively check that the engine never loses
#[instrument]
fn run_audit(mark: Mark) -> Result<()> {
    let seats = Seats::new(mark);
    for automated_first in [false, true] {
        let tally = audit(seats, automated_first);
        let opener = if automated_first { "computer" } else { "human" };
        println!(
            "{} opens: {} games, human wins {}, computer wins {}, ties {}",
            opener,
            tally.games(),
            tally.player_wins(),
            tally.opponent_wins(),
            tally.ties()
        );
        anyhow::ensure!(
            *tally.player_wins() == 0,
            "engine lost {} games when the {} opened",
            tally.player_wins(),
            opener
        );
    }
    Ok(())
}

/// Print the persisted scores
#[instrument(skip(config_path))]
fn run_scores(config_path: &Path, score_file: Option<std::path::PathBuf>) -> Result<()> {
    let config = GameConfig::load_or_default(config_path)?;
    let Some(path) = score_file.or_else(|| config.score_file().clone()) else {
        println!("No score file configured; scores are kept in memory only.");
        return Ok(());
    };

    let scores = JsonScoreFile::open(&path)?;
    println!("{}: {}", scores.path().display(), scores.current_tuple());
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,strictly_minimax=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
