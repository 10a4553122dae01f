//! Service configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use strictly_gomoku::DEFAULT_BOARD_SIZE;
use tracing::{debug, info, instrument};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "GOMOKU_CONFIG";

/// Board sizes accepted by [`GomokuConfig::validate`].
pub const BOARD_SIZE_RANGE: RangeInclusive<usize> = 5..=50;

/// Settings shared by every session of one service.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GomokuConfig {
    /// Side length of new boards.
    board_size: usize,

    /// Display names the chat platform sends when it has none to give.
    placeholder_names: Vec<String>,
}

impl Default for GomokuConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            placeholder_names: vec!["unknown".to_string()],
        }
    }
}

impl GomokuConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(board_size = config.board_size, "Config loaded successfully");
        Ok(config)
    }

    /// Loads from `path`, else from `$GOMOKU_CONFIG`, else defaults.
    #[instrument]
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Rejects board sizes outside [`BOARD_SIZE_RANGE`].
    #[instrument(skip(self), fields(board_size = self.board_size))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !BOARD_SIZE_RANGE.contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "board_size must be between {} and {}, got {}",
                BOARD_SIZE_RANGE.start(),
                BOARD_SIZE_RANGE.end(),
                self.board_size
            )));
        }
        Ok(())
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
