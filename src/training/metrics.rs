//! Training metrics and convergence tracking

use std::fmt;

/// Metrics accumulated over one epoch
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    /// Sum of batch losses weighted by batch size
    pub weighted_loss: f64,
    /// Sum of absolute errors
    pub abs_error_sum: f64,
    /// Samples seen
    pub total_samples: usize,
    /// Number of batches accumulated
    pub batch_count: usize,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update metrics with a batch result
    pub fn update(&mut self, loss: f32, mae: f32, batch_size: usize) {
        self.weighted_loss += loss as f64 * batch_size as f64;
        self.abs_error_sum += mae as f64 * batch_size as f64;
        self.total_samples += batch_size;
        self.batch_count += 1;
    }

    /// Loss averaged over samples
    pub fn avg_loss(&self) -> f64 {
        if self.total_samples == 0 {
            0.0
        } else {
            self.weighted_loss / self.total_samples as f64
        }
    }

    /// Mean absolute error over samples
    pub fn mae(&self) -> f64 {
        if self.total_samples == 0 {
            0.0
        } else {
            self.abs_error_sum / self.total_samples as f64
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loss: {:.4} | MAE: {:.3} ({} batches)",
            self.avg_loss(),
            self.mae(),
            self.batch_count
        )
    }
}

/// Loss curve for one fit, with a tolerance-based stopping rule
///
/// An epoch counts as "no improvement" when its loss is not at least `tol` below the
/// best loss so far. Training stops once that happens more than `patience` epochs in a
/// row.
#[derive(Debug, Clone)]
pub struct TrainingHistory {
    pub losses: Vec<f64>,
    pub maes: Vec<f64>,
    pub best_loss: f64,
    pub best_epoch: usize,
    pub converged: bool,
    tol: f64,
    no_improvement_count: usize,
}

impl TrainingHistory {
    pub fn new(tol: f64) -> Self {
        TrainingHistory {
            losses: Vec::new(),
            maes: Vec::new(),
            best_loss: f64::INFINITY,
            best_epoch: 0,
            converged: false,
            tol,
            no_improvement_count: 0,
        }
    }

    /// Record metrics for an epoch
    pub fn record_epoch(&mut self, epoch: usize, metrics: &Metrics) {
        let loss = metrics.avg_loss();
        self.losses.push(loss);
        self.maes.push(metrics.mae());

        if loss > self.best_loss - self.tol {
            self.no_improvement_count += 1;
        } else {
            self.no_improvement_count = 0;
        }

        if loss < self.best_loss {
            self.best_loss = loss;
            self.best_epoch = epoch;
        }
    }

    /// Check if the loss has stalled for more than `patience` epochs
    pub fn should_stop(&self, patience: usize) -> bool {
        self.no_improvement_count > patience
    }

    /// Number of epochs run
    pub fn n_iter(&self) -> usize {
        self.losses.len()
    }

    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }
}
