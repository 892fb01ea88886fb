use rand::SeedableRng;
use rand::rngs::StdRng;

use super::observation::{StateVector, encode_state};
use crate::game::{GameConfig, GameEngine, GameState, Position, RelativeAction, StepResult};

/// Outcome of one environment step, as the learner sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub reward: f32,
    pub done: bool,
    pub score: u32,
}

impl From<&StepResult> for StepOutcome {
    fn from(result: &StepResult) -> Self {
        Self {
            reward: result.reward,
            done: result.terminated,
            score: result.score,
        }
    }
}

/// Snake environment for reinforcement learning
///
/// Owns the game engine and the live game state. Callers only get a
/// read-only view of the state through [`SnakeEnvironment::state`].
pub struct SnakeEnvironment {
    engine: GameEngine,
    state: GameState,
    last_step: Option<StepResult>,
}

impl SnakeEnvironment {
    /// Create a new environment, placing food with `rng`
    pub fn new(config: GameConfig, rng: StdRng) -> Self {
        let mut engine = GameEngine::new(config, rng);
        let state = engine.reset();
        Self {
            engine,
            state,
            last_step: None,
        }
    }

    /// Create an environment with a deterministic food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Start a new episode
    pub fn reset(&mut self) {
        self.state = self.engine.reset();
        self.last_step = None;
    }

    /// Advance one step with a relative action
    pub fn step(&mut self, action: RelativeAction) -> StepOutcome {
        let result = self.engine.step(&mut self.state, action);
        let outcome = StepOutcome::from(&result);
        self.last_step = Some(result);
        outcome
    }

    /// Collision probe; `None` checks the current head
    pub fn is_collision(&self, point: Option<Position>) -> bool {
        self.state.is_collision(point)
    }

    /// Encoded features for the current state
    pub fn observe(&self) -> StateVector {
        encode_state(&self.state)
    }

    /// Get reference to current game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Full result of the most recent step, if any since the last reset
    pub fn last_step(&self) -> Option<&StepResult> {
        self.last_step.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
