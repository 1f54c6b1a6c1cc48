use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::action::Direction;
use crate::error::SnakeError;

/// Fixed duration of one game tick
pub const TICK_DURATION: Duration = Duration::from_millis(60);

/// Smallest side length that leaves room for a centered three-segment snake
pub const MIN_GRID_SIZE: usize = 7;

/// Largest side length accepted for a grid
pub const MAX_GRID_SIZE: usize = 256;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid, walls included
    pub grid_width: usize,
    /// Height of the game grid, walls included
    pub grid_height: usize,
    /// Heading of the snake when the game starts
    pub initial_heading: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 24,
            initial_heading: Direction::Right,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .map_err(|e| SnakeError::Config(e.to_string()))
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Reject grids too small to hold the starting snake or too large to allocate
    pub fn validate(&self) -> Result<(), SnakeError> {
        if self.grid_width < MIN_GRID_SIZE || self.grid_height < MIN_GRID_SIZE {
            return Err(SnakeError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min: MIN_GRID_SIZE,
            });
        }
        if self.grid_width > MAX_GRID_SIZE || self.grid_height > MAX_GRID_SIZE {
            return Err(SnakeError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_SIZE,
            });
        }
        Ok(())
    }
}
