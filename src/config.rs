//! Game configuration loaded from TOML.

use crate::games::tictactoe::{Mark, Pacing, Seats};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Mark the human plays (the opponent takes the other one).
    #[serde(default = "default_human_mark")]
    human_mark: Mark,

    /// Whether the opponent opens each game.
    #[serde(default)]
    automated_moves_first: bool,

    /// Pause before the opponent answers a human move, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    reply_delay_ms: u64,

    /// Pause before the opponent's opening move after a restart, in milliseconds.
    #[serde(default = "default_opening_delay_ms")]
    opening_delay_ms: u64,

    /// Where scores are kept between runs. Scores stay in memory when unset.
    #[serde(default)]
    score_file: Option<PathBuf>,
}

fn default_human_mark() -> Mark {
    Mark::X
}

fn default_reply_delay_ms() -> u64 {
    280
}

fn default_opening_delay_ms() -> u64 {
    350
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_mark: default_human_mark(),
            automated_moves_first: false,
            reply_delay_ms: default_reply_delay_ms(),
            opening_delay_ms: default_opening_delay_ms(),
            score_file: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Seat assignment for the controller.
    pub fn seats(&self) -> Seats {
        Seats::new(self.human_mark)
    }

    /// Move pacing for the controller.
    pub fn pacing(&self) -> Pacing {
        Pacing::new(
            Duration::from_millis(self.reply_delay_ms),
            Duration::from_millis(self.opening_delay_ms),
        )
    }

    /// Overrides the human's mark.
    pub fn with_human_mark(mut self, mark: Mark) -> Self {
        self.human_mark = mark;
        self
    }

    /// Overrides who opens each game.
    pub fn with_automated_moves_first(mut self, automated_moves_first: bool) -> Self {
        self.automated_moves_first = automated_moves_first;
        self
    }

    /// Overrides the score file.
    pub fn with_score_file(mut self, score_file: PathBuf) -> Self {
        self.score_file = Some(score_file);
        self
    }

    /// Removes all pauses.
    pub fn without_delays(mut self) -> Self {
        self.reply_delay_ms = 0;
        self.opening_delay_ms = 0;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: GameConfig = toml::from_str("automated_moves_first = true\n").unwrap();
        assert!(*config.automated_moves_first());
        assert_eq!(*config.human_mark(), Mark::X);
        assert_eq!(config.pacing(), Pacing::default());
        assert_eq!(*config.score_file(), None);
    }

    #[test]
    fn test_full_file() {
        let config: GameConfig = toml::from_str(
            r#"
            human_mark = "O"
            reply_delay_ms = 0
            opening_delay_ms = 10
            score_file = "scores.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.seats().opponent(), Mark::X);
        assert_eq!(*config.opening_delay_ms(), 10);
        assert_eq!(config.score_file().as_deref(), Some(Path::new("scores.json")));
    }

    #[test]
    fn test_unknown_mark_is_rejected() {
        assert!(toml::from_str::<GameConfig>("human_mark = \"Z\"\n").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "reply_delay_ms = \"soon\"").unwrap();
        let err = GameConfig::from_file(&path).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
