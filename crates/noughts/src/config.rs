//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::{BlendPolicy, Difficulty, GameSetup};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a play session.
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Name for player 1 (X). Blank uses "Player 1".
    player1: String,

    /// Name for player 2 (O). Blank uses "AI" or "Player 2".
    player2: String,

    /// Whether player 2 is the computer.
    vs_ai: bool,

    /// Computer strength.
    difficulty: Difficulty,

    /// How long the computer "thinks" before moving, in milliseconds.
    think_delay_ms: u64,

    /// Seed for the computer's random choices. Unset draws from the OS.
    seed: Option<u64>,

    /// Search probability and depth for the medium and hard tiers.
    blend: BlendPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player1: String::new(),
            player2: String::new(),
            vs_ai: false,
            difficulty: Difficulty::default(),
            think_delay_ms: 500,
            seed: None,
            blend: BlendPolicy::default(),
        }
    }
}

/// Command-line values that replace file values when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replacement name for player 1.
    pub player1: Option<String>,
    /// Replacement name for player 2.
    pub player2: Option<String>,
    /// Replacement opponent mode.
    pub vs_ai: Option<bool>,
    /// Replacement difficulty.
    pub difficulty: Option<Difficulty>,
    /// Replacement think delay.
    pub think_delay_ms: Option<u64>,
    /// Replacement seed.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(vs_ai = config.vs_ai, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text and validates it.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the type system cannot.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (tier, mix) in [("medium", self.blend.medium), ("hard", self.blend.hard)] {
            if !mix.is_valid() {
                return Err(ConfigError::new(format!(
                    "blend.{} probability must be within [0, 1], got {}",
                    tier, mix.probability
                )));
            }
        }
        Ok(())
    }

    /// Replaces file values with any overrides that are set.
    #[instrument(skip(self))]
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(player1) = overrides.player1 {
            self.player1 = player1;
        }
        if let Some(player2) = overrides.player2 {
            self.player2 = player2;
        }
        if let Some(vs_ai) = overrides.vs_ai {
            self.vs_ai = vs_ai;
        }
        if let Some(difficulty) = overrides.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(think_delay_ms) = overrides.think_delay_ms {
            self.think_delay_ms = think_delay_ms;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
    }

    /// Builds the setup for the first game.
    pub fn setup(&self) -> GameSetup {
        GameSetup {
            player1: self.player1.clone(),
            player2: self.player2.clone(),
            ai_enabled: self.vs_ai,
            difficulty: self.difficulty,
        }
    }

    /// Returns the computer's thinking delay.
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
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
