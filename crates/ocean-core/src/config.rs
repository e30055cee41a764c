//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of grid rows
    pub rows: i32,
    /// Number of grid columns
    pub cols: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { rows: 20, cols: 40 }
    }
}

impl WorldConfig {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Validated grid extents. A grid needs at least one row and one column.
    pub fn dimensions(&self) -> Result<(usize, usize)> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must have positive dimensions, got {} rows x {} cols",
                self.rows, self.cols
            )));
        }
        Ok((self.rows as usize, self.cols as usize))
    }
}

/// Terminal display and pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Pause between ticks (milliseconds)
    pub tick_interval_ms: u64,
    /// Clear the terminal before drawing each frame
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            clear_screen: true,
        }
    }
}

/// Simulation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility; chosen at startup when absent
    pub seed: Option<u64>,
    /// Stop after this many ticks; run until interrupted when absent
    pub max_ticks: Option<u64>,
    /// Log a population census every N ticks (0 disables)
    pub census_interval: u64,
    pub world: WorldConfig,
    pub display: DisplayConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_ticks: None,
            census_interval: 10,
            world: WorldConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
