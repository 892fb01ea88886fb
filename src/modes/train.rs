//! Training mode for the Q-learning agent
//!
//! Runs the observe, act, learn loop against the Snake environment. Every step
//! trains on the single new transition and stores it for replay; every
//! finished episode resets the game, runs a replay update and reports the
//! score to the frontend.
//!
//! # Example
//!
//! ```rust,ignore
//! use snake_qlearn::modes::{TrainConfig, TrainMode};
//! use snake_qlearn::render::HeadlessFrontend;
//! use snake_qlearn::rl::{default_device, TrainingBackend};
//!
//! let config = TrainConfig::new(Some(500));
//! let frontend = Box::new(HeadlessFrontend::default());
//! let mut train_mode = TrainMode::<TrainingBackend>::new(config, default_device(), frontend)?;
//! let stats = train_mode.run()?;
//! ```

use anyhow::{Context, Result, anyhow};
use burn::tensor::backend::AutodiffBackend;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game::GameConfig;
use crate::metrics::TrainingStats;
use crate::render::{Control, Frontend};
use crate::rl::{AgentConfig, QAgent, SnakeEnvironment, Transition};

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Stop after this many episodes; `None` trains until shutdown
    pub max_episodes: Option<usize>,

    /// Print a progress summary every N episodes (0 disables it)
    pub log_frequency: usize,

    /// Seed for the environment and agent random streams
    pub seed: Option<u64>,

    /// Board size and rewards
    pub game_config: GameConfig,

    /// Q-learning hyperparameters
    pub agent_config: AgentConfig,
}

impl TrainConfig {
    /// Create a training configuration with default game and agent settings
    ///
    /// # Example
    ///
    /// ```rust
    /// use snake_qlearn::modes::TrainConfig;
    ///
    /// let config = TrainConfig::new(Some(1000));
    /// assert_eq!(config.max_episodes, Some(1000));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(max_episodes: Option<usize>) -> Self {
        Self {
            max_episodes,
            log_frequency: 100,
            seed: None,
            game_config: GameConfig::default(),
            agent_config: AgentConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_episodes == Some(0) {
            return Err("max_episodes must be positive".to_string());
        }
        self.game_config.validate()?;
        self.agent_config.validate()?;
        Ok(())
    }

    /// Print training header information
    pub fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("Q-Learning Training - Snake");
        println!("{}", "=".repeat(70));
        match self.max_episodes {
            Some(n) => println!("Episodes: {}", n),
            None => println!("Episodes: unlimited"),
        }
        println!(
            "Board: {}x{} px ({}x{} cells of {} px)",
            self.game_config.width,
            self.game_config.height,
            self.game_config.columns(),
            self.game_config.rows(),
            self.game_config.block_size
        );
        println!("Agent Config:");
        println!("  Learning rate: {}", self.agent_config.learning_rate);
        println!("  Gamma: {}", self.agent_config.gamma);
        println!("  Hidden units: {}", self.agent_config.hidden_dim);
        println!("  Replay memory: {}", self.agent_config.max_memory);
        println!("  Replay batch: {}", self.agent_config.batch_size);
        println!(
            "  Exploration: random below {} - games out of {}",
            self.agent_config.exploration_episodes, self.agent_config.exploration_range
        );
        match self.seed {
            Some(seed) => println!("Seed: {}", seed),
            None => println!("Seed: random"),
        }
        if self.log_frequency > 0 {
            println!("Logging: Every {} episodes", self.log_frequency);
        }
        println!("{}", "=".repeat(70));
        println!();
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Summary of a finished episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    /// 1-based episode number
    pub episode: usize,
    pub score: u32,
    pub record: u32,
    pub new_record: bool,
    pub steps: usize,
    /// Loss of the end-of-episode replay update
    pub replay_loss: f32,
}

/// What a single training step produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepEvent {
    Continue,
    EpisodeFinished(EpisodeSummary),
    /// The frontend asked to stop
    Shutdown,
}

/// Training mode for the Q-learning agent
pub struct TrainMode<B: AutodiffBackend> {
    agent: QAgent<B>,
    env: SnakeEnvironment,
    stats: TrainingStats,
    frontend: Box<dyn Frontend>,
    config: TrainConfig,

    /// Steps taken in the current episode
    episode_steps: usize,
}

impl<B: AutodiffBackend> TrainMode<B> {
    /// Create a training mode with a fresh agent and a reset environment
    pub fn new(config: TrainConfig, device: B::Device, frontend: Box<dyn Frontend>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid training configuration: {}", e))?;

        // Independent streams for the game and the agent
        let mut seeder = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let env_rng = StdRng::seed_from_u64(seeder.next_u64());
        let agent_rng = StdRng::seed_from_u64(seeder.next_u64());

        let env = SnakeEnvironment::new(config.game_config.clone(), env_rng);
        let agent = QAgent::new(config.agent_config.clone(), device, agent_rng)
            .context("Failed to create agent")?;

        Ok(Self {
            agent,
            env,
            stats: TrainingStats::new(100),
            frontend,
            config,
            episode_steps: 0,
        })
    }

    /// Run until the episode limit is reached or the frontend asks to stop
    pub fn run(&mut self) -> Result<&TrainingStats> {
        loop {
            match self.step()? {
                StepEvent::Continue => {}
                StepEvent::EpisodeFinished(summary) => {
                    if self.config.max_episodes.is_some_and(|max| summary.episode >= max) {
                        break;
                    }
                }
                StepEvent::Shutdown => break,
            }
        }

        Ok(&self.stats)
    }

    /// Advance the game by one move and learn from it
    pub fn step(&mut self) -> Result<StepEvent> {
        let state_old = self.env.observe();
        let action = self.agent.get_action(&state_old);
        let outcome = self.env.step(action);
        let state_new = self.env.observe();

        let transition =
            Transition::new(state_old, action, outcome.reward, state_new, outcome.done);
        let loss = self.agent.train_short_memory(&transition);
        self.stats.record_short_loss(loss);
        self.agent.remember(transition);
        self.episode_steps += 1;

        if self.frontend.present(self.env.state(), &self.stats)? == Control::Quit {
            return Ok(StepEvent::Shutdown);
        }

        if !outcome.done {
            return Ok(StepEvent::Continue);
        }

        self.env.reset();
        let replay_loss = self.agent.finish_episode();
        self.stats.record_long_loss(replay_loss);

        let steps = std::mem::take(&mut self.episode_steps);
        let new_record = self.stats.record_episode(outcome.score, steps);
        self.frontend
            .plot(self.stats.scores(), self.stats.mean_scores())
            .context("Failed to plot scores")?;

        let episode = self.stats.total_episodes();
        if self.config.log_frequency > 0 && episode % self.config.log_frequency == 0 {
            self.print_progress(episode);
        }

        Ok(StepEvent::EpisodeFinished(EpisodeSummary {
            episode,
            score: outcome.score,
            record: self.stats.record(),
            new_record,
            steps,
            replay_loss,
        }))
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    pub fn agent(&self) -> &QAgent<B> {
        &self.agent
    }

    pub fn env(&self) -> &SnakeEnvironment {
        &self.env
    }

    /// Consume the mode, releasing the frontend, and keep the statistics
    pub fn into_stats(self) -> TrainingStats {
        self.stats
    }

    fn print_progress(&mut self, episode: usize) {
        let progress = match self.config.max_episodes {
            Some(max) => format!(
                "[Episode {}/{}] eps {:.3} | {}",
                episode,
                max,
                self.agent.exploration_rate(),
                self.stats.format_summary()
            ),
            None => format!(
                "[Episode {}] eps {:.3} | {}",
                episode,
                self.agent.exploration_rate(),
                self.stats.format_summary()
            ),
        };
        self.frontend.log(&progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use crate::render::HeadlessFrontend;
    use crate::rl::{TrainingBackend, default_device};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn small_config(max_episodes: Option<usize>) -> TrainConfig {
        let mut config = TrainConfig::new(max_episodes);
        config.seed = Some(7);
        config.log_frequency = 0;
        config.game_config = GameConfig::small();
        config.game_config.stall_factor = 10;
        config.agent_config.hidden_dim = 16;
        config.agent_config.batch_size = 32;
        config
    }

    /// Counts frames and plots, and quits after a fixed number of frames
    struct ScriptedFrontend {
        frames: Rc<RefCell<usize>>,
        plots: Rc<RefCell<Vec<usize>>>,
        quit_after: usize,
    }

    impl Frontend for ScriptedFrontend {
        fn present(&mut self, _state: &GameState, _stats: &TrainingStats) -> Result<Control> {
            let mut frames = self.frames.borrow_mut();
            *frames += 1;
            if *frames >= self.quit_after {
                Ok(Control::Quit)
            } else {
                Ok(Control::Continue)
            }
        }

        fn plot(&mut self, scores: &[u32], mean_scores: &[f32]) -> Result<()> {
            assert_eq!(scores.len(), mean_scores.len());
            self.plots.borrow_mut().push(scores.len());
            Ok(())
        }

        fn log(&mut self, _message: &str) {}
    }

    #[test]
    fn test_train_config_defaults() {
        let config = TrainConfig::default();
        assert_eq!(config.max_episodes, None);
        assert_eq!(config.log_frequency, 100);
        assert_eq!(config.game_config.width, 640);
        assert_eq!(config.agent_config.batch_size, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_train_config_validation() {
        let mut config = TrainConfig::new(Some(0));
        assert!(config.validate().is_err());

        config.max_episodes = Some(1);
        config.game_config.block_size = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = small_config(Some(1));
        config.agent_config.gamma = 2.0;

        let result = TrainMode::<TrainingBackend>::new(
            config,
            default_device(),
            Box::new(HeadlessFrontend::default()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_run_stops_at_episode_limit() {
        let config = small_config(Some(2));
        let mut train_mode = TrainMode::<TrainingBackend>::new(
            config,
            default_device(),
            Box::new(HeadlessFrontend::default()),
        )
        .unwrap();

        let stats = train_mode.run().unwrap();
        assert_eq!(stats.total_episodes(), 2);
        assert_eq!(stats.scores().len(), 2);
        assert_eq!(stats.mean_scores().len(), 2);

        let total_steps = stats.total_steps();
        assert_eq!(train_mode.agent().n_games(), 2);
        assert_eq!(train_mode.agent().memory().len(), total_steps);

        // The environment was reset for the next episode
        assert!(train_mode.env().state().is_alive);
        assert_eq!(train_mode.env().state().steps, 0);
    }

    #[test]
    fn test_episode_summary() {
        let config = small_config(None);
        let mut train_mode = TrainMode::<TrainingBackend>::new(
            config,
            default_device(),
            Box::new(HeadlessFrontend::default()),
        )
        .unwrap();

        let mut steps = 0;
        let summary = loop {
            steps += 1;
            match train_mode.step().unwrap() {
                StepEvent::Continue => {}
                StepEvent::EpisodeFinished(summary) => break summary,
                StepEvent::Shutdown => panic!("headless frontend never quits"),
            }
        };

        assert_eq!(summary.episode, 1);
        assert_eq!(summary.steps, steps);
        assert_eq!(summary.record, summary.score);
        assert_eq!(summary.new_record, summary.score > 0);
        assert_eq!(train_mode.stats().total_steps(), steps);
    }

    #[test]
    fn test_frontend_quit_stops_training() {
        let frames = Rc::new(RefCell::new(0));
        let plots = Rc::new(RefCell::new(Vec::new()));
        let frontend = ScriptedFrontend {
            frames: Rc::clone(&frames),
            plots: Rc::clone(&plots),
            quit_after: 5,
        };

        let mut train_mode =
            TrainMode::<TrainingBackend>::new(small_config(None), default_device(), Box::new(frontend))
                .unwrap();
        train_mode.run().unwrap();

        assert_eq!(*frames.borrow(), 5);
        // Every step before the quit was learned from
        assert_eq!(train_mode.agent().memory().len(), 5);
        assert_eq!(plots.borrow().len(), train_mode.stats().total_episodes());
    }

    #[test]
    fn test_plot_receives_growing_history() {
        let frames = Rc::new(RefCell::new(0));
        let plots = Rc::new(RefCell::new(Vec::new()));
        let frontend = ScriptedFrontend {
            frames: Rc::clone(&frames),
            plots: Rc::clone(&plots),
            quit_after: usize::MAX,
        };

        let mut train_mode =
            TrainMode::<TrainingBackend>::new(small_config(Some(3)), default_device(), Box::new(frontend))
                .unwrap();
        train_mode.run().unwrap();

        assert_eq!(*plots.borrow(), vec![1, 2, 3]);
        assert_eq!(*frames.borrow(), train_mode.stats().total_steps());
    }
}
