//! Presentation and score-plot sinks for the training loop
//!
//! The training loop hands every frame and every finished episode's score
//! history to a [`Frontend`]. Nothing a frontend does feeds back into
//! learning; the only thing it can return is a request to stop.

use anyhow::Result;
use clap::ValueEnum;
use std::time::Duration;

use crate::game::GameState;
use crate::metrics::TrainingStats;

/// What the training loop should do after presenting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// The user asked to shut the process down
    Quit,
}

/// Frame pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Speed {
    /// 8 steps per second
    Slow,
    /// 40 steps per second
    Normal,
    /// 200 steps per second
    Fast,
    /// No delay
    Max,
}

impl Speed {
    /// Delay after each presented frame
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(125),
            Self::Normal => Duration::from_millis(25),
            Self::Fast => Duration::from_millis(5),
            Self::Max => Duration::ZERO,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::Max => "Max",
        }
    }
}

/// Receives frames and score history from the training loop
pub trait Frontend {
    /// Show the state after a step
    fn present(&mut self, state: &GameState, stats: &TrainingStats) -> Result<Control>;

    /// Receive per-episode scores and the running mean after an episode ends
    fn plot(&mut self, scores: &[u32], mean_scores: &[f32]) -> Result<()>;

    /// Show a progress line
    fn log(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Console frontend: no board, one line per finished episode
#[derive(Debug, Clone)]
pub struct HeadlessFrontend {
    tick: Duration,
}

impl HeadlessFrontend {
    pub fn new(speed: Speed) -> Self {
        Self {
            tick: speed.tick_interval(),
        }
    }
}

impl Default for HeadlessFrontend {
    fn default() -> Self {
        Self::new(Speed::Max)
    }
}

impl Frontend for HeadlessFrontend {
    fn present(&mut self, _state: &GameState, _stats: &TrainingStats) -> Result<Control> {
        if !self.tick.is_zero() {
            std::thread::sleep(self.tick);
        }
        Ok(Control::Continue)
    }

    fn plot(&mut self, scores: &[u32], mean_scores: &[f32]) -> Result<()> {
        if let Some(line) = episode_line(scores, mean_scores) {
            println!("{}", line);
        }
        Ok(())
    }
}

/// `Game N Score S Record: R Mean: M` for the latest episode
fn episode_line(scores: &[u32], mean_scores: &[f32]) -> Option<String> {
    let (&score, &mean) = (scores.last()?, mean_scores.last()?);
    let record = scores.iter().copied().max().unwrap_or(score);

    Some(format!(
        "Game {} Score {} Record: {} Mean: {:.2}",
        scores.len(),
        score,
        record,
        mean
    ))
}
