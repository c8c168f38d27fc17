//! Process configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for one participant process.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Name shown to other participants and used in generated room names.
    #[serde(default = "default_display_name")]
    display_name: String,

    /// Relay region to connect to.
    #[serde(default = "default_region")]
    region: String,

    /// Side length of the tic-tac-toe board.
    #[serde(default = "default_tictactoe_size")]
    tictactoe_size: usize,

    /// Dots-and-boxes board width, in cells.
    #[serde(default = "default_dots_width")]
    dots_width: usize,

    /// Dots-and-boxes board height, in cells.
    #[serde(default = "default_dots_height")]
    dots_height: usize,
}

fn default_display_name() -> String {
    "Player".to_string()
}

fn default_region() -> String {
    "jp".to_string()
}

fn default_tictactoe_size() -> usize {
    3
}

fn default_dots_width() -> usize {
    6
}

fn default_dots_height() -> usize {
    4
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            region: default_region(),
            tictactoe_size: default_tictactoe_size(),
            dots_width: default_dots_width(),
            dots_height: default_dots_height(),
        }
    }
}

impl DuelConfig {
    /// Returns a copy with a different display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(display_name = %config.display_name, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given and present, otherwise the defaults.
    #[instrument]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                info!(path = %path.display(), "Config file not found; using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Rejects board dimensions that cannot hold a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tictactoe_size == 0 {
            return Err(ConfigError::new("tictactoe_size must be at least 1".to_string()));
        }
        if self.dots_width == 0 || self.dots_height == 0 {
            return Err(ConfigError::new(
                "dots_width and dots_height must be at least 1".to_string(),
            ));
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
