//! Q-learning agent hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Q-learning agent
///
/// Defaults reproduce the reference training run: a 100k-transition replay
/// memory, 1000-transition replay batches, Adam at 1e-3 and a 0.9 discount.
///
/// # Example
///
/// ```rust
/// use snake_qlearn::rl::AgentConfig;
///
/// let config = AgentConfig {
///     batch_size: 64,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Replay buffer capacity; the oldest transitions are evicted beyond it
    ///
    /// Default: 100_000
    pub max_memory: usize,

    /// Largest replay batch drawn at the end of an episode
    ///
    /// Default: 1000
    pub batch_size: usize,

    /// Learning rate for the Adam optimizer
    ///
    /// Default: 0.001
    pub learning_rate: f64,

    /// Discount factor for future rewards (gamma)
    ///
    /// Default: 0.9
    pub gamma: f32,

    /// Width of the value network's hidden layer
    ///
    /// Default: 256
    pub hidden_dim: usize,

    /// Episode count at which random exploration stops
    ///
    /// Default: 80
    pub exploration_episodes: u32,

    /// Upper bound (exclusive) of the draw compared against the exploration
    /// threshold; `exploration_episodes / exploration_range` is the initial
    /// exploration rate
    ///
    /// Default: 200
    pub exploration_range: u32,
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_memory == 0 {
            return Err("max_memory must be at least 1".to_string());
        }

        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }

        if self.learning_rate <= 0.0 {
            return Err(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            ));
        }

        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in [0, 1], got {}", self.gamma));
        }

        if self.hidden_dim == 0 {
            return Err("hidden_dim must be at least 1".to_string());
        }

        if self.exploration_range == 0 {
            return Err("exploration_range must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_memory: 100_000,
            batch_size: 1000,
            learning_rate: 0.001,
            gamma: 0.9,
            hidden_dim: 256,
            exploration_episodes: 80,
            exploration_range: 200,
        }
    }
}
