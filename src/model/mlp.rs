//! MLP regressor model
//!
//! Architecture: Input(n_teams) → Hidden(100) → ReLU → Linear(1)
//!
//! Weights are drawn from a caller-supplied RNG (Glorot uniform) so that a seeded
//! fit does not depend on the backend's global random state.

use burn::module::{Module, Param};
use burn::nn::Linear;
use burn::tensor::activation::relu;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use rand::Rng;

/// Configuration for the MLP regressor
#[derive(Debug, Clone)]
pub struct MlpRegressorConfig {
    /// Input dimension (one-hot width)
    pub input_dim: usize,
    /// Hidden layer width
    pub hidden_size: usize,
}

impl MlpRegressorConfig {
    pub fn new(input_dim: usize) -> Self {
        MlpRegressorConfig {
            input_dim,
            hidden_size: 100,
        }
    }

    pub fn with_hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = hidden_size;
        self
    }
}

/// Single-output regressor with one ReLU hidden layer
#[derive(Module, Debug)]
pub struct MlpRegressorModel<B: Backend> {
    hidden: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> MlpRegressorModel<B> {
    /// Create a new model with Glorot-uniform weights and biases
    pub fn new<R: Rng>(device: &B::Device, config: &MlpRegressorConfig, rng: &mut R) -> Self {
        MlpRegressorModel {
            hidden: glorot_linear(device, rng, config.input_dim, config.hidden_size),
            output: glorot_linear(device, rng, config.hidden_size, 1),
        }
    }

    /// Forward pass
    ///
    /// # Arguments
    /// * `features` - One-hot features [batch, input_dim]
    ///
    /// # Returns
    /// Predicted values [batch, 1]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.hidden.forward(features));
        self.output.forward(x)
    }

    /// Sum of squared weights (biases excluded), for the L2 penalty
    pub fn squared_weight_norm(&self) -> Tensor<B, 1> {
        let hidden = self.hidden.weight.val().powf_scalar(2.0).sum();
        let output = self.output.weight.val().powf_scalar(2.0).sum();
        hidden + output
    }
}

fn glorot_linear<B: Backend, R: Rng>(
    device: &B::Device,
    rng: &mut R,
    d_input: usize,
    d_output: usize,
) -> Linear<B> {
    let bound = (6.0 / (d_input + d_output) as f32).sqrt();

    let weight: Vec<f32> = (0..d_input * d_output)
        .map(|_| rng.gen_range(-bound..bound))
        .collect();
    let bias: Vec<f32> = (0..d_output)
        .map(|_| rng.gen_range(-bound..bound))
        .collect();

    let weight = Tensor::<B, 1>::from_floats(weight.as_slice(), device)
        .reshape([d_input, d_output]);
    let bias = Tensor::<B, 1>::from_floats(bias.as_slice(), device);

    Linear {
        weight: Param::from_tensor(weight),
        bias: Some(Param::from_tensor(bias)),
    }
}
