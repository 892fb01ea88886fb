//! Temporal-difference training of the Q-value network
//!
//! One call to [`QTrainer::train_step`] performs a single Adam update on a
//! batch of transitions. The regression target for each transition copies the
//! network's current prediction and overwrites only the taken action's slot:
//!
//! ```text
//! target[a] = r                          if done
//! target[a] = r + γ * max_a' Q(s', a')   otherwise
//! ```
//!
//! so the loss gradient flows through the taken action alone.

use burn::{
    module::AutodiffModule,
    optim::{Adam, AdamConfig, GradientsParams, Optimizer, adaptor::OptimizerAdaptor},
    tensor::{ElementConversion, Tensor, TensorData, backend::AutodiffBackend},
};

use super::buffer::Transition;
use super::network::QNetwork;
use super::observation::{StateVector, states_to_tensor};
use crate::game::RelativeAction;

/// Action values for one state, in `[Straight, TurnRight, TurnLeft]` order
pub type QValues = [f32; RelativeAction::COUNT];

/// Bootstrapped value for the taken action
pub fn td_target(reward: f32, done: bool, gamma: f32, next_q: &QValues) -> f32 {
    if done {
        reward
    } else {
        let best_next = next_q.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        reward + gamma * best_next
    }
}

/// Build the flattened `[batch, 3]` regression target
///
/// `predictions` holds the current Q(s) row-major; `next_q` holds Q(s') per
/// transition.
pub fn td_targets(
    predictions: &[f32],
    batch: &[Transition],
    next_q: &[QValues],
    gamma: f32,
) -> Vec<f32> {
    let mut target = predictions.to_vec();
    for (i, transition) in batch.iter().enumerate() {
        let slot = i * RelativeAction::COUNT + transition.action.index();
        target[slot] = td_target(transition.reward, transition.done, gamma, &next_q[i]);
    }
    target
}

/// Owns the Q-network and its optimizer
pub struct QTrainer<B: AutodiffBackend> {
    network: QNetwork<B>,
    optim: OptimizerAdaptor<Adam, QNetwork<B>, B>,
    learning_rate: f64,
    gamma: f32,
    device: B::Device,
}

impl<B: AutodiffBackend> QTrainer<B> {
    pub fn new(network: QNetwork<B>, learning_rate: f64, gamma: f32, device: B::Device) -> Self {
        Self {
            network,
            optim: AdamConfig::new().init(),
            learning_rate,
            gamma,
            device,
        }
    }

    /// Gradient-free Q-value estimates for a batch of states
    pub fn q_values(&self, states: &[StateVector]) -> Vec<QValues> {
        if states.is_empty() {
            return Vec::new();
        }

        let network = self.network.clone().valid();
        let input = states_to_tensor::<B::InnerBackend>(states, &self.device);
        let output: Vec<f32> = network.forward(input).into_data().iter::<f32>().collect();

        output
            .chunks_exact(RelativeAction::COUNT)
            .map(|row| [row[0], row[1], row[2]])
            .collect()
    }

    /// Run one optimisation step over `batch`, returning the MSE loss
    pub fn train_step(&mut self, batch: &[Transition]) -> f32 {
        if batch.is_empty() {
            return 0.0;
        }

        let states: Vec<StateVector> = batch.iter().map(|t| t.state).collect();
        let next_states: Vec<StateVector> = batch.iter().map(|t| t.next_state).collect();
        let next_q = self.q_values(&next_states);

        let input: Tensor<B, 2> = states_to_tensor(&states, &self.device);
        let predictions = self.network.forward(input);

        let current: Vec<f32> = predictions.clone().into_data().iter::<f32>().collect();
        let target = td_targets(&current, batch, &next_q, self.gamma);
        let target: Tensor<B, 2> = Tensor::from_data(
            TensorData::new(target, [batch.len(), RelativeAction::COUNT]),
            &self.device,
        );

        let diff = predictions - target;
        let loss = (diff.clone() * diff).mean();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.network);
        self.network = self
            .optim
            .step(self.learning_rate, self.network.clone(), grads);

        loss.into_scalar().elem::<f32>()
    }

    pub fn network(&self) -> &QNetwork<B> {
        &self.network
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{QNetworkConfig, TrainingBackend, default_device};

    fn trainer() -> QTrainer<TrainingBackend> {
        let device = default_device();
        let network = QNetworkConfig::new(32).init::<TrainingBackend>(&device);
        QTrainer::new(network, 0.001, 0.9, device)
    }

    fn transition(action: RelativeAction, reward: f32, done: bool) -> Transition {
        let mut state = [0.0; 11];
        state[0] = 1.0;
        state[4] = 1.0;
        Transition::new(state, action, reward, [0.0; 11], done)
    }

    #[test]
    fn test_td_target_terminal() {
        assert_eq!(td_target(-10.0, true, 0.9, &[5.0, 7.0, 1.0]), -10.0);
    }

    #[test]
    fn test_td_target_bootstraps_from_best_next_action() {
        let target = td_target(10.0, false, 0.9, &[5.0, 7.0, 1.0]);
        assert!((target - (10.0 + 0.9 * 7.0)).abs() < 1e-5);

        let target = td_target(0.0, false, 0.9, &[-3.0, -1.0, -2.0]);
        assert!((target - (-0.9)).abs() < 1e-5);
    }

    #[test]
    fn test_td_targets_only_touch_taken_action() {
        let predictions = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let batch = [
            transition(RelativeAction::TurnRight, 10.0, true),
            transition(RelativeAction::TurnLeft, 0.0, false),
        ];
        let next_q = [[0.0, 0.0, 0.0], [1.0, 2.0, 0.5]];

        let target = td_targets(&predictions, &batch, &next_q, 0.9);

        assert_eq!(target[0], 1.0);
        assert_eq!(target[1], 10.0);
        assert_eq!(target[2], 3.0);
        assert_eq!(target[3], 4.0);
        assert_eq!(target[4], 5.0);
        assert!((target[5] - 1.8).abs() < 1e-5);
    }

    #[test]
    fn test_q_values_shape() {
        let trainer = trainer();
        let q = trainer.q_values(&[[0.0; 11], [1.0; 11]]);
        assert_eq!(q.len(), 2);
        assert!(q.iter().flatten().all(|v| v.is_finite()));
        assert!(trainer.q_values(&[]).is_empty());
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut trainer = trainer();
        assert_eq!(trainer.train_step(&[]), 0.0);
    }

    #[test]
    fn test_repeated_updates_move_toward_target() {
        let mut trainer = trainer();
        let t = transition(RelativeAction::Straight, 10.0, true);

        let before = trainer.q_values(&[t.state])[0][0];
        let first_loss = trainer.train_step(&[t]);
        let mut last_loss = first_loss;
        for _ in 0..200 {
            last_loss = trainer.train_step(&[t]);
        }
        let after = trainer.q_values(&[t.state])[0][0];

        assert!(last_loss < first_loss, "{} !< {}", last_loss, first_loss);
        assert!((10.0 - after).abs() < (10.0 - before).abs());
    }

    #[test]
    fn test_batch_update_returns_finite_loss() {
        let mut trainer = trainer();
        let batch: Vec<Transition> = (0..64)
            .map(|i| {
                let action = RelativeAction::ALL[i % 3];
                transition(action, if i % 5 == 0 { -10.0 } else { 0.0 }, i % 5 == 0)
            })
            .collect();

        let loss = trainer.train_step(&batch);
        assert!(loss.is_finite());
        assert!(loss >= 0.0);
    }
}
