//! Q-value network for the Snake agent
//!
//! A two-layer perceptron mapping the 11 encoded state features to one value
//! estimate per relative action.
//!
//! # Architecture
//!
//! ```text
//! Input: [batch, 11]
//!   ↓ Linear(11 → 256) + ReLU
//!   ↓ Linear(256 → 3)
//! Output: [batch, 3]   (Straight, TurnRight, TurnLeft)
//! ```
//!
//! # Example
//!
//! ```rust
//! use snake_qlearn::rl::{QNetworkConfig, QNetwork};
//! use burn::backend::ndarray::NdArrayDevice;
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//!
//! type Backend = NdArray<f32>;
//!
//! let device = NdArrayDevice::default();
//! let network: QNetwork<Backend> = QNetworkConfig::new(256).init(&device);
//!
//! let states = Tensor::zeros([4, 11], &device);
//! let q_values = network.forward(states);
//! assert_eq!(q_values.dims(), [4, 3]);
//! ```

use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{Tensor, activation::relu, backend::Backend},
};

use super::observation::STATE_DIM;
use crate::game::RelativeAction;

/// Configuration for the Q-value network
#[derive(Debug, Clone)]
pub struct QNetworkConfig {
    /// Number of input features (default: 11)
    pub input_dim: usize,

    /// Hidden layer width (default: 256)
    pub hidden_dim: usize,

    /// Number of action values produced (default: 3)
    pub num_actions: usize,
}

impl QNetworkConfig {
    /// Create a configuration for the Snake state encoding with the given hidden width
    pub fn new(hidden_dim: usize) -> Self {
        Self {
            input_dim: STATE_DIM,
            hidden_dim,
            num_actions: RelativeAction::COUNT,
        }
    }

    /// Initialize the network from this configuration
    pub fn init<B: Backend>(&self, device: &B::Device) -> QNetwork<B> {
        QNetwork {
            hidden: LinearConfig::new(self.input_dim, self.hidden_dim).init(device),
            output: LinearConfig::new(self.hidden_dim, self.num_actions).init(device),
        }
    }
}

impl Default for QNetworkConfig {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Feed-forward Q-value approximator
#[derive(Module, Debug)]
pub struct QNetwork<B: Backend> {
    hidden: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> QNetwork<B> {
    /// Forward pass: `[batch, 11]` states to `[batch, 3]` action values
    pub fn forward(&self, states: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.hidden.forward(states);
        let x = relu(x);
        self.output.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::Autodiff;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};
    use burn::tensor::{Distribution, TensorData};

    type TestBackend = NdArray<f32>;
    type TestAutodiffBackend = Autodiff<NdArray<f32>>;

    #[test]
    fn test_forward_pass_shapes() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::default().init::<TestBackend>(&device);

        for batch_size in [1, 4, 32, 1000] {
            let states = Tensor::zeros([batch_size, STATE_DIM], &device);
            assert_eq!(network.forward(states).dims(), [batch_size, 3]);
        }
    }

    #[test]
    fn test_custom_hidden_width() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new(8).init::<TestBackend>(&device);
        let states = Tensor::ones([2, STATE_DIM], &device);
        assert_eq!(network.forward(states).dims(), [2, 3]);
    }

    #[test]
    fn test_gradient_flow() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::default().init::<TestAutodiffBackend>(&device);

        let states = Tensor::<TestAutodiffBackend, 2>::ones([1, STATE_DIM], &device).require_grad();
        let loss = network.forward(states.clone()).sum();
        let gradients = loss.backward();

        assert!(
            states.grad(&gradients).is_some(),
            "Gradients should flow back to the input states"
        );
    }

    #[test]
    fn test_batch_consistency() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::default().init::<TestBackend>(&device);

        let single = Tensor::<TestBackend, 2>::random(
            [1, STATE_DIM],
            Distribution::Uniform(0.0, 1.0),
            &device,
        );
        let batch = Tensor::cat(vec![single.clone(), single.clone(), single.clone()], 0);

        let single_out: TensorData = network.forward(single).into_data();
        let batch_out: TensorData = network.forward(batch).into_data();

        let single_vals: Vec<f32> = single_out.iter::<f32>().collect();
        let batch_vals: Vec<f32> = batch_out.iter::<f32>().collect();

        for row in 0..3 {
            for j in 0..3 {
                let diff = (single_vals[j] - batch_vals[row * 3 + j]).abs();
                assert!(diff < 1e-5, "row {} slot {} differs by {}", row, j, diff);
            }
        }
    }

    #[test]
    fn test_output_finite() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::default().init::<TestBackend>(&device);

        let states = Tensor::random([8, STATE_DIM], Distribution::Uniform(0.0, 1.0), &device);
        let data: TensorData = network.forward(states).into_data();
        for val in data.iter::<f32>() {
            assert!(val.is_finite(), "Q-values should be finite, got: {}", val);
        }
    }
}
