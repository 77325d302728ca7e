//! Neural network architecture
//!
//! A single-hidden-layer MLP regressor over one-hot team features.

pub mod mlp;

pub use mlp::{MlpRegressorConfig, MlpRegressorModel};
