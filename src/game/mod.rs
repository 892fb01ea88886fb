//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Actions are relative to the snake's heading (straight, turn right, turn left).

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, RelativeAction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult, TerminalCause};
pub use state::{GameState, Position, Snake};
