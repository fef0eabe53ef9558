//! Simulation configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_MS_PER_TICK;
use crate::enums::CameraMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Scheduler interval in milliseconds.
    pub ms_per_tick: u64,
    /// RNG seed for miss rolls and default agent decisions.
    pub seed: u64,
    pub gravity: f64,
    pub grid_width: u32,
    pub grid_height: u32,
    pub view_width: f64,
    pub view_height: f64,
    pub starting_money: u32,
    /// Ticks between DISPERSE_PHEROMONES messages.
    pub dispersing_pheromone_update_rate: u64,
    pub camera_mode: CameraMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ms_per_tick: DEFAULT_MS_PER_TICK,
            seed: 42,
            gravity: 9.8,
            grid_width: 80,
            grid_height: 60,
            view_width: 40.0,
            view_height: 30.0,
            starting_money: 100,
            dispersing_pheromone_update_rate: 4,
            camera_mode: CameraMode::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ms_per_tick == 0 {
            return Err(ConfigError::Invalid("ms_per_tick must be positive".into()));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::Invalid("grid dimensions must be positive".into()));
        }
        if self.view_width <= 0.0 || self.view_height <= 0.0 {
            return Err(ConfigError::Invalid("view dimensions must be positive".into()));
        }
        if self.dispersing_pheromone_update_rate == 0 {
            return Err(ConfigError::Invalid(
                "dispersing_pheromone_update_rate must be positive".into(),
            ));
        }
        Ok(())
    }
}
