//! Session settings
//!
//! Chosen on the options screen and read once when a session starts. The
//! simulation never writes them back.

use serde::{Deserialize, Serialize};

/// Who is in the arena and what ends the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// One human ship against the asteroids
    #[default]
    Classic,
    /// Human and cpu ships share the asteroid field
    Coop,
    /// Human against cpu, no asteroids
    Versus,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Coop => "Coop",
            GameMode::Versus => "Versus",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "coop" | "co-op" => Some(GameMode::Coop),
            "versus" | "vs" => Some(GameMode::Versus),
            _ => None,
        }
    }

    /// Whether a cpu-controlled ship takes part
    pub fn has_cpu(&self) -> bool {
        !matches!(self, GameMode::Classic)
    }

    /// Whether lasers damage ships instead of asteroids
    pub fn is_versus(&self) -> bool {
        matches!(self, GameMode::Versus)
    }
}

/// Starting lives tiers offered on the options screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LivesOption {
    One,
    #[default]
    Three,
    Five,
    Ten,
}

impl LivesOption {
    pub fn lives(&self) -> u32 {
        match self {
            LivesOption::One => 1,
            LivesOption::Three => 3,
            LivesOption::Five => 5,
            LivesOption::Ten => 10,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game mode
    pub mode: GameMode,
    /// Lives each player starts with
    pub lives: LivesOption,
    /// Vibrate on wave clear and ship loss
    pub vibrate: bool,
    /// Sound effects enabled
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Classic,
            lives: LivesOption::Three,
            vibrate: true,
            sound: true,
        }
    }
}

impl Settings {
    /// Settings for a given mode with everything else at defaults
    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parse settings from JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
