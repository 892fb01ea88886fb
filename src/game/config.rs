use serde::{Deserialize, Serialize};

/// Largest accepted board side, in units
pub const MAX_BOARD_SIDE: i32 = 10_000;

/// Configuration for the game
///
/// Coordinates are in board units; one grid cell spans `block_size` units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board in units
    pub width: i32,
    /// Height of the board in units
    pub height: i32,
    /// Size of one grid cell in units
    pub block_size: i32,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Rewards (for RL)
    /// Reward for eating food
    pub food_reward: f32,
    /// Penalty for dying or stalling
    pub death_penalty: f32,
    /// An episode ends once the step counter exceeds `stall_factor * snake length`
    pub stall_factor: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            block_size: 20,
            initial_snake_length: 3,
            food_reward: 10.0,
            death_penalty: -10.0,
            stall_factor: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Number of grid columns
    pub fn columns(&self) -> i32 {
        self.width / self.block_size
    }

    /// Number of grid rows
    pub fn rows(&self) -> i32 {
        self.height / self.block_size
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0 || self.height <= 0 {
            return Err(format!(
                "board dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }

        if self.width > MAX_BOARD_SIDE || self.height > MAX_BOARD_SIDE {
            return Err(format!(
                "board {}x{} exceeds the {} unit limit per side",
                self.width, self.height, MAX_BOARD_SIDE
            ));
        }

        if self.block_size <= 0 {
            return Err(format!("block_size must be positive, got {}", self.block_size));
        }

        if self.width % self.block_size != 0 || self.height % self.block_size != 0 {
            return Err(format!(
                "board {}x{} is not a whole number of {}-unit cells",
                self.width, self.height, self.block_size
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        // The snake spawns centred and trails to the left
        let centre_column = (self.columns() / 2) as usize;
        if self.rows() < 1 || centre_column + 1 < self.initial_snake_length {
            return Err(format!(
                "board {}x{} is too small for a snake of length {}",
                self.width, self.height, self.initial_snake_length
            ));
        }

        if self.stall_factor == 0 {
            return Err("stall_factor must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::game::GameEngine;
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.block_size, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.stall_factor, 100);
        assert_eq!(config.columns(), 32);
        assert_eq!(config.rows(), 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(300, 200);
        assert_eq!(config.width, 300);
        assert_eq!(config.height, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_partial_cells() {
        let config = GameConfig::new(650, 480);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_tiny_board() {
        let config = GameConfig::new(60, 60);
        assert!(config.validate().is_err());

        let mut config = GameConfig::small();
        config.block_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_positive_dimensions() {
        assert!(GameConfig::new(-200, 480).validate().is_err());
        assert!(GameConfig::new(640, -20).validate().is_err());
        assert!(GameConfig::new(0, 480).validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_board() {
        let config = GameConfig::new(MAX_BOARD_SIDE + 20, 480);
        assert!(config.validate().is_err());

        let config = GameConfig::new(MAX_BOARD_SIDE, MAX_BOARD_SIDE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_valid_config_resets_cleanly() {
        for (width, height) in [(640, 480), (200, 200), (80, 20)] {
            let config = GameConfig::new(width, height);
            assert!(config.validate().is_ok());

            let state = GameEngine::with_seed(config, 0).reset();
            assert!(state.is_in_bounds(state.food));
        }
    }
}
