//! Prediction and reporting
//!
//! Train per-statistic regressors, forecast a fixture, and present the result.

pub mod inference;
pub mod prompt;
pub mod report;

pub use inference::Predictor;
pub use prompt::{prompt_teams, select_fixture, TeamSelection};
pub use report::{determine_winner, forecast_json, format_forecast, MatchForecast};
