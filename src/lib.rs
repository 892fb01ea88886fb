//! Snake QL - a Snake game played by a Q-learning agent
//!
//! This library provides:
//! - Core game logic (game module)
//! - State encoding, value network, replay memory and agent (rl module)
//! - Score history and training statistics (metrics module)
//! - Headless and TUI frontends (render and input modules)
//! - The training loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
