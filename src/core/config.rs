//! Game configuration.
//!
//! A match is configured by three groups of settings:
//! - `RosterConfig`: how many players and how long their names may be
//! - `GridConfig`: the largest grid allowed
//! - `ScoringConfig`: points carried by pairs and by the jolly card
//!
//! `MemoryConfig` combines them and can be loaded from TOML. Missing keys
//! fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cards::SYMBOL_POOL_SIZE;
use crate::error::ConfigError;

/// Smallest grid: one pair plus the bomb and the jolly.
pub const MIN_CELLS: usize = 4;

/// Roster limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub min_players: usize,
    pub max_players: usize,
    /// Minimum name length, in characters.
    pub min_name_length: usize,
    /// Maximum name length, in characters.
    pub max_name_length: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 6,
            min_name_length: 3,
            max_name_length: 15,
        }
    }
}

/// Grid limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Upper bound on `rows * cols`.
    pub max_cells: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { max_cells: 186 }
    }
}

/// Point values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Bonus awarded for revealing the jolly.
    pub jolly_points: u32,
    /// Lowest value a pair can be worth.
    pub min_pair_points: u32,
    /// Highest value a pair can be worth.
    pub max_pair_points: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            jolly_points: 20,
            min_pair_points: 1,
            max_pair_points: 9,
        }
    }
}

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub roster: RosterConfig,
    pub grid: GridConfig,
    pub scoring: ScoringConfig,
}

impl MemoryConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: MemoryConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let roster = &self.roster;
        if roster.min_players == 0 {
            return Err(ConfigError::Validation(
                "roster.min_players must be >= 1".into(),
            ));
        }
        if roster.min_players > roster.max_players {
            return Err(ConfigError::Validation(
                "roster.min_players must be <= roster.max_players".into(),
            ));
        }
        if roster.max_players > 255 {
            return Err(ConfigError::Validation(
                "roster.max_players must be <= 255".into(),
            ));
        }
        if roster.min_name_length == 0 {
            return Err(ConfigError::Validation(
                "roster.min_name_length must be >= 1".into(),
            ));
        }
        if roster.min_name_length > roster.max_name_length {
            return Err(ConfigError::Validation(
                "roster.min_name_length must be <= roster.max_name_length".into(),
            ));
        }

        if self.grid.max_cells < MIN_CELLS {
            return Err(ConfigError::Validation(format!(
                "grid.max_cells must be >= {MIN_CELLS}"
            )));
        }
        if (self.grid.max_cells - 2) / 2 > SYMBOL_POOL_SIZE {
            return Err(ConfigError::Validation(format!(
                "grid.max_cells allows more pairs than the {SYMBOL_POOL_SIZE} available symbols"
            )));
        }

        let scoring = &self.scoring;
        if scoring.jolly_points == 0 {
            return Err(ConfigError::Validation(
                "scoring.jolly_points must be > 0".into(),
            ));
        }
        if scoring.min_pair_points == 0 {
            return Err(ConfigError::Validation(
                "scoring.min_pair_points must be > 0".into(),
            ));
        }
        if scoring.min_pair_points > scoring.max_pair_points {
            return Err(ConfigError::Validation(
                "scoring.min_pair_points must be <= scoring.max_pair_points".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&MemoryConfig::default()).expect("default config serializes")
    }
}
