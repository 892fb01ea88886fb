pub mod train;

pub use train::{EpisodeSummary, StepEvent, TrainConfig, TrainMode};
