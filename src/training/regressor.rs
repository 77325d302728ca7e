//! Training loop for the MLP regressor
//!
//! Adam over shuffled mini-batches, minimising half the mean squared error plus an L2
//! penalty on the weights, until the loss stalls or `max_iter` epochs have run.

use burn::data::dataloader::DataLoaderBuilder;
use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{ElementConversion, Tensor};
use rand::Rng;

use crate::data::dataset::{StatBatcher, StatDataset};
use crate::model::mlp::{MlpRegressorConfig, MlpRegressorModel};
use crate::training::metrics::{Metrics, TrainingHistory};
use crate::{FootyError, Result, TrainingConfig};

/// A trained regressor ready for inference
#[derive(Debug)]
pub struct FittedRegressor<B: Backend> {
    model: MlpRegressorModel<B>,
    history: TrainingHistory,
    input_dim: usize,
    device: B::Device,
}

impl<B: Backend> FittedRegressor<B> {
    /// Predict the target for a single feature row
    pub fn predict_row(&self, row: &[f32]) -> Result<f64> {
        if row.len() != self.input_dim {
            return Err(FootyError::Model(format!(
                "expected {} features, got {}",
                self.input_dim,
                row.len()
            )));
        }

        let input = Tensor::<B, 1>::from_floats(row, &self.device).reshape([1, self.input_dim]);
        let output = self.model.forward(input);

        let values: Vec<f32> = output
            .into_data()
            .convert::<f32>()
            .to_vec()
            .map_err(|e| FootyError::Model(format!("failed to read prediction: {:?}", e)))?;

        values
            .first()
            .map(|v| *v as f64)
            .ok_or_else(|| FootyError::Model("empty prediction".to_string()))
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }
}

/// Fits MLP regressors on one-hot feature tables
pub struct RegressorTrainer<B: AutodiffBackend> {
    config: TrainingConfig,
    device: B::Device,
}

impl<B: AutodiffBackend> RegressorTrainer<B> {
    /// Create a new trainer
    pub fn new(config: TrainingConfig, device: B::Device) -> Self {
        RegressorTrainer { config, device }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train a fresh regressor mapping `features` rows to `targets`
    ///
    /// `rng` drives weight initialisation and batch shuffling.
    pub fn fit<R: Rng>(
        &self,
        features: &[Vec<f32>],
        targets: &[f32],
        rng: &mut R,
    ) -> Result<FittedRegressor<B::InnerBackend>> {
        let dataset = StatDataset::new(features, targets)?;
        let n_samples = dataset.len();
        let input_dim = dataset.feature_dim();
        let batch_size = self.config.batch_size.clamp(1, n_samples);

        let model_config =
            MlpRegressorConfig::new(input_dim).with_hidden_size(self.config.hidden_size);
        let mut model = MlpRegressorModel::<B>::new(&self.device, &model_config, rng);

        let mut optimizer = AdamConfig::new()
            .with_beta_1(0.9)
            .with_beta_2(0.999)
            .with_epsilon(1e-8)
            .init();

        let loader = DataLoaderBuilder::new(StatBatcher::<B>::new(self.device.clone()))
            .batch_size(batch_size)
            .shuffle(rng.gen::<u64>())
            .build(dataset);

        let mut history = TrainingHistory::new(self.config.tol);

        log::debug!(
            "Fitting regressor: {} samples, {} features, batch size {}",
            n_samples,
            input_dim,
            batch_size
        );

        for epoch in 0..self.config.max_iter {
            let mut metrics = Metrics::new();

            for batch in loader.iter() {
                let batch_len = batch.targets.dims()[0];

                let predictions = model.forward(batch.features);
                let error = predictions - batch.targets;

                // 0.5 * MSE + alpha * ||W||^2 / (2 * batch)
                let squared_error = error.clone().powf_scalar(2.0).mean() * 0.5;
                let penalty =
                    model.squared_weight_norm() * (self.config.alpha / (2.0 * batch_len as f64));
                let loss = squared_error + penalty;

                let loss_val: f32 = loss.clone().into_scalar().elem();
                let mae_val: f32 = error.abs().mean().into_scalar().elem();

                let grads = loss.backward();
                let grads = GradientsParams::from_grads(grads, &model);
                model = optimizer.step(self.config.learning_rate, model, grads);

                metrics.update(loss_val, mae_val, batch_len);
            }

            history.record_epoch(epoch, &metrics);
            log::trace!("Epoch {}/{}: {}", epoch + 1, self.config.max_iter, metrics);

            if history.should_stop(self.config.n_iter_no_change) {
                history.converged = true;
                break;
            }
        }

        if history.converged {
            log::debug!(
                "Converged after {} epochs (loss {:.4})",
                history.n_iter(),
                history.final_loss().unwrap_or(f64::NAN)
            );
        } else {
            log::warn!(
                "Reached max_iter ({}) without converging (loss {:.4})",
                self.config.max_iter,
                history.final_loss().unwrap_or(f64::NAN)
            );
        }

        Ok(FittedRegressor {
            model: model.valid(),
            history,
            input_dim,
            device: self.device.clone(),
        })
    }
}
