//! Epsilon-greedy Q-learning agent
//!
//! The agent owns the value network (through [`QTrainer`]), the replay memory
//! and the exploration schedule. Each environment step feeds one short-term
//! update; each finished episode triggers one long-term update over a replay
//! batch.

use anyhow::{Result, anyhow};
use burn::tensor::backend::AutodiffBackend;
use rand::Rng;
use rand::rngs::StdRng;

use super::buffer::{ReplayBuffer, Transition};
use super::config::AgentConfig;
use super::network::QNetworkConfig;
use super::observation::StateVector;
use super::trainer::{QTrainer, QValues};
use crate::game::RelativeAction;

/// Linear exploration decay
///
/// The threshold is `max(0, episodes - n_games)`; an action is random when a
/// uniform draw from `[0, range)` falls below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorationSchedule {
    pub episodes: u32,
    pub range: u32,
}

impl ExplorationSchedule {
    pub fn new(episodes: u32, range: u32) -> Self {
        Self { episodes, range }
    }

    /// Exploration threshold after `n_games` finished episodes
    pub fn threshold(&self, n_games: u32) -> u32 {
        self.episodes.saturating_sub(n_games)
    }

    /// Probability of a random action after `n_games` finished episodes
    pub fn probability(&self, n_games: u32) -> f32 {
        (self.threshold(n_games) as f32 / self.range as f32).min(1.0)
    }

    pub fn should_explore<R: Rng + ?Sized>(&self, n_games: u32, rng: &mut R) -> bool {
        rng.gen_range(0..self.range) < self.threshold(n_games)
    }
}

impl From<&AgentConfig> for ExplorationSchedule {
    fn from(config: &AgentConfig) -> Self {
        Self::new(config.exploration_episodes, config.exploration_range)
    }
}

/// Index of the largest value, the first one on ties
pub fn argmax(values: &QValues) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Q-learning agent
pub struct QAgent<B: AutodiffBackend> {
    trainer: QTrainer<B>,
    memory: ReplayBuffer,
    schedule: ExplorationSchedule,
    config: AgentConfig,
    n_games: u32,
    /// Transitions used by the most recent replay update
    last_replay_batch: usize,
    rng: StdRng,
}

impl<B: AutodiffBackend> QAgent<B> {
    /// Create an agent with a freshly initialised network
    pub fn new(config: AgentConfig, device: B::Device, rng: StdRng) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid agent configuration: {}", e))?;

        let network = QNetworkConfig::new(config.hidden_dim).init::<B>(&device);
        let trainer = QTrainer::new(network, config.learning_rate, config.gamma, device);

        Ok(Self {
            trainer,
            memory: ReplayBuffer::new(config.max_memory),
            schedule: ExplorationSchedule::from(&config),
            config,
            n_games: 0,
            last_replay_batch: 0,
            rng,
        })
    }

    /// Pick the next action for `state`
    pub fn get_action(&mut self, state: &StateVector) -> RelativeAction {
        if self.schedule.should_explore(self.n_games, &mut self.rng) {
            let idx = self.rng.gen_range(0..RelativeAction::COUNT);
            RelativeAction::ALL[idx]
        } else {
            self.best_action(state)
        }
    }

    /// Greedy action according to the current value estimates
    pub fn best_action(&self, state: &StateVector) -> RelativeAction {
        let q = self.q_values(state);
        RelativeAction::ALL[argmax(&q)]
    }

    pub fn q_values(&self, state: &StateVector) -> QValues {
        self.trainer
            .q_values(std::slice::from_ref(state))
            .first()
            .copied()
            .unwrap_or_default()
    }

    /// Single-transition update run after every step
    pub fn train_short_memory(&mut self, transition: &Transition) -> f32 {
        self.trainer.train_step(std::slice::from_ref(transition))
    }

    /// Store a transition for later replay
    pub fn remember(&mut self, transition: Transition) {
        self.memory.push(transition);
    }

    /// Replay update over a batch drawn from memory
    pub fn train_long_memory(&mut self) -> f32 {
        let batch = self.memory.sample(self.config.batch_size, &mut self.rng);
        self.last_replay_batch = batch.len();
        self.trainer.train_step(&batch)
    }

    /// Close an episode: count it, then run the long-term update
    pub fn finish_episode(&mut self) -> f32 {
        self.n_games += 1;
        self.train_long_memory()
    }

    /// Number of finished episodes
    pub fn n_games(&self) -> u32 {
        self.n_games
    }

    /// Current probability of taking a random action
    pub fn exploration_rate(&self) -> f32 {
        self.schedule.probability(self.n_games)
    }

    pub fn last_replay_batch(&self) -> usize {
        self.last_replay_batch
    }

    pub fn memory(&self) -> &ReplayBuffer {
        &self.memory
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}
