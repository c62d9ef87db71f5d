//! Game settings: difficulty preset and level sequence
//!
//! Loaded from JSON when the runner is given a path, otherwise defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BALL_MAX_LIFETIMES, BALL_MAX_RADII, TICK_INTERVAL_MS};
use crate::error::ConfigError;

/// Difficulty presets (1 is easy, 3 is hard)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Map a 1-based play level to a preset, clamping out-of-range values
    pub fn from_level(level: i32) -> Self {
        match level.clamp(1, 3) {
            1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    /// 1-based play level
    pub fn level(&self) -> i32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "medium" | "med" | "2" => Some(Difficulty::Medium),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Radius at which an exploding ball stops growing
    pub fn max_radius(&self) -> f32 {
        BALL_MAX_RADII[(self.level() - 1) as usize]
    }

    /// Steps an exploding ball lingers at max radius
    pub fn max_lifetime(&self) -> u32 {
        BALL_MAX_LIFETIMES[(self.level() - 1) as usize]
    }
}

/// One entry of the level sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Balls spawned when the level starts
    pub initial_balls: u32,
    /// Balls that must be chain-detonated to pass
    pub target: u32,
}

impl LevelConfig {
    pub const fn new(initial_balls: u32, target: u32) -> Self {
        Self {
            initial_balls,
            target,
        }
    }
}

/// Default level sequence, strictly increasing in difficulty
pub const DEFAULT_LEVELS: [LevelConfig; 4] = [
    LevelConfig::new(5, 1),
    LevelConfig::new(10, 2),
    LevelConfig::new(15, 4),
    LevelConfig::new(20, 6),
];

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Explosion size/lifetime preset
    pub difficulty: Difficulty,
    /// Frame cadence the host should drive `step_frame` at
    pub tick_interval_ms: u32,
    /// RNG seed (fixed default when absent)
    pub seed: Option<u64>,
    /// Level sequence
    pub levels: Vec<LevelConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            tick_interval_ms: TICK_INTERVAL_MS,
            seed: None,
            levels: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({} levels, {})",
            path.display(),
            settings.levels.len(),
            settings.difficulty.as_str()
        );
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the game can't be played with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for (level, cfg) in self.levels.iter().enumerate() {
            if cfg.initial_balls == 0 {
                return Err(ConfigError::EmptyLevel { level });
            }
            if cfg.target == 0 || cfg.target > cfg.initial_balls {
                return Err(ConfigError::InvalidTarget {
                    level,
                    target: cfg.target,
                    initial_balls: cfg.initial_balls,
                });
            }
        }
        Ok(())
    }
}
