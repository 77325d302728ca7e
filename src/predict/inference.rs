//! Per-statistic training and inference

use burn::tensor::backend::AutodiffBackend;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

use crate::data::HistoricalData;
use crate::predict::report::MatchForecast;
use crate::training::{FittedRegressor, RegressorTrainer};
use crate::{Fixture, Result, StatPrediction, Statistic, TrainingConfig};

/// Home and away regressors for one statistic
struct RegressorPair<B: burn::tensor::backend::Backend> {
    home: FittedRegressor<B>,
    away: FittedRegressor<B>,
}

/// Predictor for a single fixture
///
/// Regressors are trained on first use of each statistic and reused afterwards, unless
/// `retrain_each_call` is set, in which case every call fits a fresh pair.
pub struct Predictor<'a, B: AutodiffBackend> {
    data: &'a HistoricalData,
    fixture: Fixture,
    trainer: RegressorTrainer<B>,
    retrain_each_call: bool,
    fitted: HashMap<Statistic, RegressorPair<B::InnerBackend>>,
}

impl<'a, B: AutodiffBackend> Predictor<'a, B> {
    /// Create a new predictor
    pub fn new(
        data: &'a HistoricalData,
        fixture: Fixture,
        training: TrainingConfig,
        device: B::Device,
    ) -> Self {
        Predictor {
            data,
            fixture,
            trainer: RegressorTrainer::new(training, device),
            retrain_each_call: false,
            fitted: HashMap::new(),
        }
    }

    pub fn with_retrain_each_call(mut self, retrain: bool) -> Self {
        self.retrain_each_call = retrain;
        self
    }

    pub fn fixture(&self) -> Fixture {
        self.fixture
    }

    /// Predicted full-time goals (home, away)
    pub fn goals(&mut self) -> Result<StatPrediction> {
        self.predict(Statistic::Goals)
    }

    /// Predicted shots (home, away)
    pub fn shots(&mut self) -> Result<StatPrediction> {
        self.predict(Statistic::Shots)
    }

    /// Predicted fouls (home, away)
    pub fn fouls(&mut self) -> Result<StatPrediction> {
        self.predict(Statistic::Fouls)
    }

    /// Predict one statistic for the fixture
    pub fn predict(&mut self, stat: Statistic) -> Result<StatPrediction> {
        // Encode first so an unknown team fails before any training
        let home_row = self
            .data
            .home()
            .encoder()
            .encode(self.fixture.home.display_name())?;
        let away_row = self
            .data
            .away()
            .encoder()
            .encode(self.fixture.away.display_name())?;

        if self.retrain_each_call || !self.fitted.contains_key(&stat) {
            let pair = self.train(stat)?;
            self.fitted.insert(stat, pair);
        }

        let pair = &self.fitted[&stat];
        let prediction = StatPrediction::new(
            pair.home.predict_row(&home_row)?,
            pair.away.predict_row(&away_row)?,
        );

        log::debug!(
            "{} for {}: {:.2} - {:.2}",
            stat,
            self.fixture,
            prediction.home,
            prediction.away
        );
        Ok(prediction)
    }

    /// Predict goals, shots and fouls
    pub fn forecast(&mut self) -> Result<MatchForecast> {
        Ok(MatchForecast {
            fixture: self.fixture,
            goals: self.goals()?,
            shots: self.shots()?,
            fouls: self.fouls()?,
        })
    }

    fn train(&self, stat: Statistic) -> Result<RegressorPair<B::InnerBackend>> {
        let (home_col, away_col) = stat.columns();
        log::info!(
            "Training {} regressors on {} matches ({} / {})",
            stat.to_string().to_lowercase(),
            self.data.len(),
            home_col,
            away_col
        );

        let (home_targets, away_targets) = self.data.targets(stat);

        let home = self.trainer.fit(
            self.data.home().rows(),
            &home_targets,
            &mut self.rng_for(stat, 0),
        )?;
        let away = self.trainer.fit(
            self.data.away().rows(),
            &away_targets,
            &mut self.rng_for(stat, 1),
        )?;

        log::info!(
            "  home: {} epochs (loss {:.4}), away: {} epochs (loss {:.4})",
            home.history().n_iter(),
            home.history().best_loss,
            away.history().n_iter(),
            away.history().best_loss
        );

        Ok(RegressorPair { home, away })
    }

    /// Independent RNG stream per (statistic, side)
    ///
    /// Seeded streams don't depend on call order, so cached and retrained predictions
    /// agree.
    fn rng_for(&self, stat: Statistic, side: u64) -> StdRng {
        match self.trainer.config().seed {
            Some(seed) => {
                let stream = match stat {
                    Statistic::Goals => 0,
                    Statistic::Shots => 2,
                    Statistic::Fouls => 4,
                };
                StdRng::seed_from_u64(seed.wrapping_add(stream + side))
            }
            None => StdRng::from_entropy(),
        }
    }
}
