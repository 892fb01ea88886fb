//! Experience replay memory
//!
//! Transitions are kept in insertion order up to a fixed capacity; once full,
//! each new transition evicts the oldest one.

use rand::Rng;
use rand::seq::index;
use std::collections::VecDeque;

use super::observation::StateVector;
use crate::game::RelativeAction;

/// One recorded step of experience
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: StateVector,
    pub action: RelativeAction,
    pub reward: f32,
    pub next_state: StateVector,
    pub done: bool,
}

impl Transition {
    pub fn new(
        state: StateVector,
        action: RelativeAction,
        reward: f32,
        next_state: StateVector,
        done: bool,
    ) -> Self {
        Self {
            state,
            action,
            reward,
            next_state,
            done,
        }
    }
}

/// Fixed-capacity FIFO store of transitions
///
/// # Example
///
/// ```rust
/// use snake_qlearn::game::RelativeAction;
/// use snake_qlearn::rl::{ReplayBuffer, Transition};
///
/// let mut buffer = ReplayBuffer::new(2);
/// let t = Transition::new([0.0; 11], RelativeAction::Straight, 0.0, [0.0; 11], false);
/// buffer.push(t);
/// buffer.push(t);
/// buffer.push(t);
///
/// assert_eq!(buffer.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ReplayBuffer {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a transition, evicting the oldest when at capacity
    pub fn push(&mut self, transition: Transition) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    /// Draw a replay batch
    ///
    /// When more than `batch_size` transitions are stored, returns a uniform
    /// sample of `batch_size` without replacement. Otherwise returns every
    /// stored transition in insertion order.
    pub fn sample<R: Rng + ?Sized>(&self, batch_size: usize, rng: &mut R) -> Vec<Transition> {
        if self.buffer.len() > batch_size {
            index::sample(rng, self.buffer.len(), batch_size)
                .into_iter()
                .map(|i| self.buffer[i])
                .collect()
        } else {
            self.buffer.iter().copied().collect()
        }
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
