//! Burn Dataset implementation for single-target regression
//!
//! One sample per historical match: a one-hot team row and one statistic value.

use crate::{FootyError, Result};
use burn::data::dataloader::batcher::Batcher;
use burn::data::dataset::Dataset;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// A training sample: one-hot team features and the observed statistic
#[derive(Debug, Clone)]
pub struct StatSample {
    pub features: Vec<f32>,
    pub target: f32,
}

/// Regression dataset for one side (home or away) of one statistic
#[derive(Debug, Clone)]
pub struct StatDataset {
    samples: Vec<StatSample>,
    feature_dim: usize,
}

impl StatDataset {
    /// Pair feature rows with targets
    pub fn new(features: &[Vec<f32>], targets: &[f32]) -> Result<Self> {
        if features.len() != targets.len() {
            return Err(FootyError::Model(format!(
                "{} feature rows but {} targets",
                features.len(),
                targets.len()
            )));
        }
        if features.is_empty() {
            return Err(FootyError::Model("cannot build an empty dataset".to_string()));
        }

        let feature_dim = features[0].len();
        if features.iter().any(|row| row.len() != feature_dim) {
            return Err(FootyError::Model("feature rows differ in width".to_string()));
        }

        let samples = features
            .iter()
            .zip(targets)
            .map(|(row, &target)| StatSample {
                features: row.clone(),
                target,
            })
            .collect();

        Ok(StatDataset {
            samples,
            feature_dim,
        })
    }

    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Dataset<StatSample> for StatDataset {
    fn get(&self, index: usize) -> Option<StatSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Batch of regression samples
#[derive(Debug, Clone)]
pub struct StatBatch<B: Backend> {
    /// One-hot features: [batch, feature_dim]
    pub features: Tensor<B, 2>,
    /// Targets: [batch, 1]
    pub targets: Tensor<B, 2>,
}

/// Batcher for StatSample
pub struct StatBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> StatBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        StatBatcher { device }
    }
}

impl<B: Backend> Batcher<B, StatSample, StatBatch<B>> for StatBatcher<B> {
    fn batch(&self, items: Vec<StatSample>, _device: &B::Device) -> StatBatch<B> {
        let batch_size = items.len();
        let feature_dim = items.first().map(|s| s.features.len()).unwrap_or(0);

        let mut feature_data = Vec::with_capacity(batch_size * feature_dim);
        let mut target_data = Vec::with_capacity(batch_size);
        for item in items {
            feature_data.extend_from_slice(&item.features);
            target_data.push(item.target);
        }

        let features = Tensor::<B, 1>::from_floats(feature_data.as_slice(), &self.device)
            .reshape([batch_size, feature_dim]);
        let targets = Tensor::<B, 1>::from_floats(target_data.as_slice(), &self.device)
            .reshape([batch_size, 1]);

        StatBatch { features, targets }
    }
}
