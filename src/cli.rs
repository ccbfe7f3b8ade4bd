//! Command-line interface for strictly_minimax.

use crate::games::tictactoe::Mark;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Minimax - tic-tac-toe against an opponent that never loses
#[derive(Parser, Debug)]
#[command(name = "strictly_minimax")]
#[command(about = "Tic-tac-toe against an exhaustive minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the game configuration file
    #[arg(long, global = true, default_value = "strictly_minimax.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Let the computer open every game
        #[arg(long)]
        computer_first: bool,

        /// Mark you play (X or O)
        #[arg(long)]
        mark: Option<Mark>,

        /// Skip the pauses before computer moves
        #[arg(long)]
        no_delay: bool,

        /// Keep scores in this JSON file
        #[arg(long)]
        score_file: Option<PathBuf>,
    },

    /// Search one position and print the best move
    BestMove {
        /// Nine cells in row-major order, e.g. "XX.OO...."
        #[arg(long)]
        board: String,

        /// Mark to move
        #[arg(long, default_value = "O")]
        to_move: Mark,

        /// Mark the engine plays (defaults to the mark to move)
        #[arg(long)]
        engine: Option<Mark>,
    },

    /// Play every possible human line against the engine and tally the results
    Audit {
        /// Mark the human plays
        #[arg(long, default_value = "X")]
        mark: Mark,
    },

    /// Show the persisted scores
    Scores {
        /// Score file to read (defaults to the configured one)
        #[arg(long)]
        score_file: Option<PathBuf>,
    },
}
