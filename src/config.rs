//! Session configuration: defaults, TOML file, then command-line overrides.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shakmaty::Color;

use crate::error::ConfigError;
use crate::session::Difficulty;

/// Which color the human plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    White,
    Black,
}

impl From<PlayerColor> for Color {
    fn from(color: PlayerColor) -> Color {
        match color {
            PlayerColor::White => Color::White,
            PlayerColor::Black => Color::Black,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Difficulty level, 1 to 5.
    pub difficulty: u8,
    /// Pause before the engine starts thinking, for pacing.
    pub engine_delay_ms: u64,
    /// Upper bound on the engine's search depth whatever the difficulty.
    pub max_engine_depth: i32,
    /// Depth used by on-demand analysis.
    pub analysis_depth: i32,
    pub player_color: PlayerColor,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            difficulty: Difficulty::DEFAULT.level(),
            engine_delay_ms: 300,
            max_engine_depth: 4,
            analysis_depth: 4,
            player_color: PlayerColor::White,
        }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn engine_delay(&self) -> Duration {
        Duration::from_millis(self.engine_delay_ms)
    }
}
