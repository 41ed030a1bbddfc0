use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rows in the grid
    pub rows: usize,
    /// Number of columns in the grid
    pub cols: usize,
    /// Width of one cell in board pixels
    pub cell_width: u32,
    /// Height of one cell in board pixels
    pub cell_height: u32,
    /// Pixels a sliding tile advances per animation tick
    pub move_velocity: u32,
    /// Animation ticks per second
    pub fps: u32,
    /// Chance that a spawned tile is a 4 instead of a 2
    pub four_probability: f64,
    /// Number of value-2 tiles placed by a new game
    pub initial_tiles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            cell_width: 200,
            cell_height: 200,
            move_velocity: 20,
            fps: 60,
            four_probability: 0.5,
            initial_tiles: 2,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Total number of cells on the board
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Board extent in pixels as (width, height)
    pub fn board_extent(&self) -> (u32, u32) {
        (
            self.cell_width * self.cols as u32,
            self.cell_height * self.rows as u32,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(ConfigError::EmptyCell {
                width: self.cell_width,
                height: self.cell_height,
            });
        }
        for extent in [self.cell_width, self.cell_height] {
            if self.move_velocity == 0 || extent % self.move_velocity != 0 {
                return Err(ConfigError::Velocity {
                    velocity: self.move_velocity,
                    extent,
                });
            }
        }
        if self.fps == 0 {
            return Err(ConfigError::FrameRate);
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::Probability(self.four_probability));
        }
        if self.initial_tiles > self.capacity() {
            return Err(ConfigError::InitialTiles {
                count: self.initial_tiles,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }
}
