//! Training statistics tracking
//!
//! Keeps the full per-episode score history (what the score plot consumes),
//! the running mean score, the best score so far, and rolling windows of
//! episode lengths and update losses.

use std::collections::VecDeque;

/// Training statistics tracker
///
/// # Example
///
/// ```rust
/// use snake_qlearn::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
/// stats.record_episode(3, 120);
/// stats.record_episode(5, 200);
///
/// assert_eq!(stats.scores(), &[3, 5]);
/// assert_eq!(stats.mean_scores(), &[3.0, 4.0]);
/// assert_eq!(stats.record(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Score of every finished episode, in order
    scores: Vec<u32>,

    /// Running mean score after each episode
    mean_scores: Vec<f32>,

    /// Sum of all episode scores
    total_score: u64,

    /// Best episode score so far
    record: u32,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Per-step update losses (rolling window)
    short_losses: VecDeque<f32>,

    /// End-of-episode replay losses (rolling window)
    long_losses: VecDeque<f32>,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a tracker whose rolling averages cover `window_size` entries
    pub fn new(window_size: usize) -> Self {
        Self {
            scores: Vec::new(),
            mean_scores: Vec::new(),
            total_score: 0,
            record: 0,
            episode_lengths: VecDeque::with_capacity(window_size),
            short_losses: VecDeque::with_capacity(window_size),
            long_losses: VecDeque::with_capacity(window_size),
            total_steps: 0,
            window_size,
        }
    }

    /// Record a finished episode
    ///
    /// Returns `true` when `score` beats the previous record.
    pub fn record_episode(&mut self, score: u32, length: usize) -> bool {
        self.scores.push(score);
        self.total_score += score as u64;
        self.mean_scores
            .push(self.total_score as f32 / self.scores.len() as f32);

        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        self.total_steps += length;

        let new_record = score > self.record;
        if new_record {
            self.record = score;
        }
        new_record
    }

    /// Record the loss of a per-step update
    pub fn record_short_loss(&mut self, loss: f32) {
        Self::push_deque(&mut self.short_losses, loss, self.window_size);
    }

    /// Record the loss of an end-of-episode replay update
    pub fn record_long_loss(&mut self, loss: f32) {
        Self::push_deque(&mut self.long_losses, loss, self.window_size);
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn mean_scores(&self) -> &[f32] {
        &self.mean_scores
    }

    /// Mean score over all episodes, 0.0 before the first one
    pub fn mean_score(&self) -> f32 {
        self.mean_scores.last().copied().unwrap_or(0.0)
    }

    /// Mean score over the rolling window
    pub fn recent_mean_score(&self) -> f32 {
        let start = self.scores.len().saturating_sub(self.window_size);
        let recent = &self.scores[start..];
        if recent.is_empty() {
            0.0
        } else {
            recent.iter().sum::<u32>() as f32 / recent.len() as f32
        }
    }

    pub fn record(&self) -> u32 {
        self.record
    }

    /// Score of the most recent episode
    pub fn last_score(&self) -> Option<u32> {
        self.scores.last().copied()
    }

    /// Mean episode length over the rolling window
    pub fn mean_episode_length(&self) -> f32 {
        let sum: usize = self.episode_lengths.iter().sum();
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_lengths.len() as f32
        }
    }

    pub fn mean_short_loss(&self) -> f32 {
        self.mean(&self.short_losses)
    }

    pub fn mean_long_loss(&self) -> f32 {
        self.mean(&self.long_losses)
    }

    pub fn total_episodes(&self) -> usize {
        self.scores.len()
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Format a one-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Games: {} | Steps: {} | Record: {} | Mean: {:.2} | Recent: {:.2} | Len: {:.1} | Step loss: {:.4} | Replay loss: {:.4}",
            self.total_episodes(),
            self.total_steps,
            self.record,
            self.mean_score(),
            self.recent_mean_score(),
            self.mean_episode_length(),
            self.mean_short_loss(),
            self.mean_long_loss(),
        )
    }

    fn mean(&self, deque: &VecDeque<f32>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<f32>() / deque.len() as f32
        }
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

impl Default for TrainingStats {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let stats = TrainingStats::new(100);
        assert_eq!(stats.window_size(), 100);
        assert_eq!(stats.total_episodes(), 0);
        assert_eq!(stats.total_steps(), 0);
        assert_eq!(stats.last_score(), None);
    }

    #[test]
    fn test_running_mean() {
        let mut stats = TrainingStats::new(100);
        stats.record_episode(0, 10);
        stats.record_episode(2, 20);
        stats.record_episode(7, 30);

        assert_eq!(stats.scores(), &[0, 2, 7]);
        let means = stats.mean_scores();
        assert!((means[0] - 0.0).abs() < 1e-5);
        assert!((means[1] - 1.0).abs() < 1e-5);
        assert!((means[2] - 3.0).abs() < 1e-5);
        assert!((stats.mean_score() - 3.0).abs() < 1e-5);
        assert_eq!(stats.total_steps(), 60);
    }

    #[test]
    fn test_record_tracking() {
        let mut stats = TrainingStats::new(100);

        assert!(stats.record_episode(4, 10));
        assert!(!stats.record_episode(2, 10));
        assert!(!stats.record_episode(4, 10));
        assert!(stats.record_episode(9, 10));
        assert_eq!(stats.record(), 9);
    }

    #[test]
    fn test_recent_mean_uses_window() {
        let mut stats = TrainingStats::new(2);
        stats.record_episode(1, 10);
        stats.record_episode(3, 10);
        stats.record_episode(5, 10);

        assert!((stats.recent_mean_score() - 4.0).abs() < 1e-5);
        assert!((stats.mean_score() - 3.0).abs() < 1e-5);
        // Full history is kept regardless of the window
        assert_eq!(stats.scores().len(), 3);
    }

    #[test]
    fn test_loss_windows() {
        let mut stats = TrainingStats::new(2);
        stats.record_short_loss(0.1);
        stats.record_short_loss(0.2);
        stats.record_short_loss(0.3);
        stats.record_long_loss(1.0);

        assert!((stats.mean_short_loss() - 0.25).abs() < 1e-5);
        assert!((stats.mean_long_loss() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_format_summary() {
        let mut stats = TrainingStats::new(100);
        stats.record_episode(5, 150);
        stats.record_long_loss(0.5);

        let summary = stats.format_summary();
        assert!(summary.contains("Games: 1"));
        assert!(summary.contains("Steps: 150"));
        assert!(summary.contains("Record: 5"));
        assert!(summary.contains("Mean: 5.00"));
        assert!(summary.contains("Replay loss: 0.5000"));
    }

    #[test]
    fn test_empty_stats() {
        let stats = TrainingStats::new(100);

        assert_eq!(stats.mean_score(), 0.0);
        assert_eq!(stats.recent_mean_score(), 0.0);
        assert_eq!(stats.mean_episode_length(), 0.0);
        assert_eq!(stats.mean_short_loss(), 0.0);
        assert_eq!(stats.mean_long_loss(), 0.0);
    }
}
