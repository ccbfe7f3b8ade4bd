//! Line commands for the console game.

use tracing::instrument;

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Play the cell with this 0-based index.
    Cell(usize),
    /// Start a new game.
    Restart,
    /// Toggle who opens the next game.
    ToggleFirst,
    /// Print the key help.
    Help,
    /// Leave the game.
    Quit,
    /// Anything else.
    Unknown(String),
}

/// Parses one line. Cells are numbered 1-9 on screen.
#[instrument]
pub fn parse_command(line: &str) -> ConsoleCommand {
    let line = line.trim();
    if let Ok(number) = line.parse::<usize>() {
        // 0 and anything above 9 map past the board and are rejected by the controller.
        return ConsoleCommand::Cell(number.wrapping_sub(1));
    }

    match line.to_ascii_lowercase().as_str() {
        "r" | "restart" => ConsoleCommand::Restart,
        "f" | "first" => ConsoleCommand::ToggleFirst,
        "h" | "help" | "?" => ConsoleCommand::Help,
        "q" | "quit" | "exit" => ConsoleCommand::Quit,
        _ => ConsoleCommand::Unknown(line.to_string()),
    }
}

/// Key help shown at start-up.
pub const HELP: &str = "Type a cell number (1-9) to play, 'r' to restart, \
'f' to toggle who opens, 'h' for help, 'q' to quit.";
