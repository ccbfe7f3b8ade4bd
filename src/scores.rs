//! Win/loss/tie counters.
//!
//! The turn controller reports every finished game to a [`ScoreTracker`].
//! [`InMemoryScores`] keeps the counters for the life of the process;
//! [`JsonScoreFile`] also rewrites them to a small JSON file after each game.

use crate::games::tictactoe::GameOutcome;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Counters of finished games. They only ever go up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ScoreTuple {
    /// Games the human won.
    #[serde(default)]
    player_wins: u32,
    /// Games the automated opponent won.
    #[serde(default)]
    opponent_wins: u32,
    /// Tied games.
    #[serde(default)]
    ties: u32,
}

impl ScoreTuple {
    /// Adds one to the counter matching `outcome`.
    pub fn record(&mut self, outcome: &GameOutcome) {
        match outcome {
            GameOutcome::PlayerWin(_) => self.player_wins += 1,
            GameOutcome::OpponentWin(_) => self.opponent_wins += 1,
            GameOutcome::Tie => self.ties += 1,
        }
    }

    /// Total number of finished games.
    pub fn games(&self) -> u32 {
        self.player_wins + self.opponent_wins + self.ties
    }
}

impl std::fmt::Display for ScoreTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You {} · Computer {} · Ties {}",
            self.player_wins, self.opponent_wins, self.ties
        )
    }
}

/// Receives finished games.
pub trait ScoreTracker {
    /// Counts one finished game.
    fn increment(&mut self, outcome: &GameOutcome);

    /// Current counters.
    fn current_tuple(&self) -> ScoreTuple;
}

/// Score tracker that lives only in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScores {
    tuple: ScoreTuple,
}

impl InMemoryScores {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreTracker for InMemoryScores {
    fn increment(&mut self, outcome: &GameOutcome) {
        self.tuple.record(outcome);
        debug!(scores = %self.tuple, "Score recorded");
    }

    fn current_tuple(&self) -> ScoreTuple {
        self.tuple
    }
}

/// Score tracker persisted as JSON.
#[derive(Debug, Clone)]
pub struct JsonScoreFile {
    path: PathBuf,
    tuple: ScoreTuple,
}

impl JsonScoreFile {
    /// Path the counters are written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the score file at `path`, starting from zero if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScoreError> {
        let path = path.as_ref().to_path_buf();

        let tuple = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ScoreError::new(format!("Failed to read score file: {}", e)))?;
            serde_json::from_str(&content)
                .map_err(|e| ScoreError::new(format!("Failed to parse score file: {}", e)))?
        } else {
            debug!("No score file yet, starting from zero");
            ScoreTuple::default()
        };

        info!(scores = %tuple, "Scores loaded");
        Ok(Self { path, tuple })
    }

    /// Writes the counters to disk.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError`] if the file cannot be written.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<(), ScoreError> {
        let content = serde_json::to_string(&self.tuple)
            .map_err(|e| ScoreError::new(format!("Failed to encode scores: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| ScoreError::new(format!("Failed to write score file: {}", e)))?;
        debug!("Scores saved");
        Ok(())
    }
}

impl ScoreTracker for JsonScoreFile {
    fn increment(&mut self, outcome: &GameOutcome) {
        self.tuple.record(outcome);
        // A failed write loses persistence, not the in-memory count.
        if let Err(e) = self.save() {
            warn!(error = %e, "Could not persist scores");
        }
    }

    fn current_tuple(&self) -> ScoreTuple {
        self.tuple
    }
}

impl<T: ScoreTracker + ?Sized> ScoreTracker for Box<T> {
    fn increment(&mut self, outcome: &GameOutcome) {
        (**self).increment(outcome)
    }

    fn current_tuple(&self) -> ScoreTuple {
        (**self).current_tuple()
    }
}

/// Score storage error.
#[derive(Debug, Clone, Display, Error)]
#[display("Score error: {} at {}:{}", message, file, line)]
pub struct ScoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ScoreError {
    /// Creates a new score error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
