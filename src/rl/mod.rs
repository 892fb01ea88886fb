//! Q-learning for the Snake game
//!
//! Provides:
//! - 11-feature state encoding
//! - a feed-forward Q-value network on the Burn NdArray backend
//! - fixed-capacity experience replay
//! - TD-target training and an epsilon-greedy agent

pub mod agent;
pub mod backend;
pub mod buffer;
pub mod config;
pub mod environment;
pub mod network;
pub mod observation;
pub mod trainer;

pub use agent::{ExplorationSchedule, QAgent, argmax};
pub use backend::{InferenceBackend, TrainingBackend, default_device, seed_backend};
pub use buffer::{ReplayBuffer, Transition};
pub use config::AgentConfig;
pub use environment::{SnakeEnvironment, StepOutcome};
pub use network::{QNetwork, QNetworkConfig};
pub use observation::{STATE_DIM, StateVector, encode_state, states_to_tensor};
pub use trainer::{QTrainer, QValues, td_target};
