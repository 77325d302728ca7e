//! Model training
//!
//! Fits MLP regressors with Adam and tracks loss convergence.

pub mod metrics;
pub mod regressor;

pub use metrics::{Metrics, TrainingHistory};
pub use regressor::{FittedRegressor, RegressorTrainer};
