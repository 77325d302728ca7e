//! Premier League match statistic prediction
//!
//! Trains small MLP regressors on one season of match data to forecast goals, shots
//! and fouls for a home/away team pairing.

pub mod data;
pub mod features;
pub mod model;
pub mod predict;
pub mod training;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A Premier League team from the 2021-22 season
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    Arsenal,
    AstonVilla,
    Brentford,
    Brighton,
    Burnley,
    Chelsea,
    CrystalPalace,
    Everton,
    Leeds,
    Leicester,
    Liverpool,
    ManCity,
    ManUnited,
    Newcastle,
    Norwich,
    Southampton,
    Tottenham,
    Watford,
    WestHam,
    Wolves,
}

impl Team {
    pub const ALL: [Team; 20] = [
        Team::Arsenal,
        Team::AstonVilla,
        Team::Brentford,
        Team::Brighton,
        Team::Burnley,
        Team::Chelsea,
        Team::CrystalPalace,
        Team::Everton,
        Team::Leeds,
        Team::Leicester,
        Team::Liverpool,
        Team::ManCity,
        Team::ManUnited,
        Team::Newcastle,
        Team::Norwich,
        Team::Southampton,
        Team::Tottenham,
        Team::Watford,
        Team::WestHam,
        Team::Wolves,
    ];

    /// Lowercase key accepted at the prompt
    pub fn key(&self) -> &'static str {
        match self {
            Team::Arsenal => "arsenal",
            Team::AstonVilla => "aston villa",
            Team::Brentford => "brentford",
            Team::Brighton => "brighton",
            Team::Burnley => "burnley",
            Team::Chelsea => "chelsea",
            Team::CrystalPalace => "crystal palace",
            Team::Everton => "everton",
            Team::Leeds => "leeds",
            Team::Leicester => "leicester city",
            Team::Liverpool => "liverpool",
            Team::ManCity => "manchester city",
            Team::ManUnited => "manchester united",
            Team::Newcastle => "newcastle",
            Team::Norwich => "norwich city",
            Team::Southampton => "southampton",
            Team::Tottenham => "tottenham hotspurs",
            Team::Watford => "watford",
            Team::WestHam => "west ham",
            Team::Wolves => "wolves",
        }
    }

    /// Name used in the match data and in printed output
    pub fn display_name(&self) -> &'static str {
        match self {
            Team::Arsenal => "Arsenal",
            Team::AstonVilla => "Aston Villa",
            Team::Brentford => "Brentford",
            Team::Brighton => "Brighton",
            Team::Burnley => "Burnley",
            Team::Chelsea => "Chelsea",
            Team::CrystalPalace => "Crystal Palace",
            Team::Everton => "Everton",
            Team::Leeds => "Leeds",
            Team::Leicester => "Leicester",
            Team::Liverpool => "Liverpool",
            Team::ManCity => "Man City",
            Team::ManUnited => "Man United",
            Team::Newcastle => "Newcastle",
            Team::Norwich => "Norwich",
            Team::Southampton => "Southampton",
            Team::Tottenham => "Tottenham",
            Team::Watford => "Watford",
            Team::WestHam => "West Ham",
            Team::Wolves => "Wolves",
        }
    }

    /// Parse user input, ignoring case and surrounding whitespace
    pub fn from_input(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        Team::ALL.into_iter().find(|t| t.key() == input)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Team {
    type Err = FootyError;

    fn from_str(s: &str) -> Result<Self> {
        Team::from_input(s).ok_or_else(|| FootyError::InvalidTeam(s.trim().to_string()))
    }
}

/// Match statistic that can be forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Goals,
    Shots,
    Fouls,
}

impl Statistic {
    pub const ALL: [Statistic; 3] = [Statistic::Goals, Statistic::Shots, Statistic::Fouls];

    /// CSV columns holding the (home, away) values of this statistic
    pub fn columns(&self) -> (&'static str, &'static str) {
        match self {
            Statistic::Goals => ("FTHG", "FTAG"),
            Statistic::Shots => ("HS", "AS"),
            Statistic::Fouls => ("HF", "AF"),
        }
    }

    /// Home and away values of this statistic for a match
    pub fn values(&self, record: &MatchRecord) -> (f32, f32) {
        match self {
            Statistic::Goals => (record.home_goals as f32, record.away_goals as f32),
            Statistic::Shots => (record.home_shots as f32, record.away_shots as f32),
            Statistic::Fouls => (record.home_fouls as f32, record.away_fouls as f32),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Goals => write!(f, "Goals"),
            Statistic::Shots => write!(f, "Shots"),
            Statistic::Fouls => write!(f, "Fouls"),
        }
    }
}

/// A single historical fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: Option<NaiveDate>,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u8,
    pub away_goals: u8,
    pub home_shots: u8,
    pub away_shots: u8,
    pub home_fouls: u8,
    pub away_fouls: u8,
}

/// A validated home/away pairing to forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub home: Team,
    pub away: Team,
}

impl Fixture {
    pub fn new(home: Team, away: Team) -> Self {
        Fixture { home, away }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs. {}", self.home, self.away)
    }
}

/// Predicted (home, away) values for one statistic, rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatPrediction {
    pub home: f64,
    pub away: f64,
}

impl StatPrediction {
    pub fn new(home: f64, away: f64) -> Self {
        StatPrediction {
            home: round2(home),
            away: round2(away),
        }
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.home, self.away)
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum FootyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No match records found in {0}")]
    EmptyDataset(String),

    #[error("Team {team} has no column in the {table} encoding")]
    UnknownTeam { team: String, table: String },

    #[error("Unknown team: {0}")]
    InvalidTeam(String),

    #[error("Both home and away teams must be selected")]
    IncompleteSelection,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model error: {0}")]
    Model(String),
}

pub type Result<T> = std::result::Result<T, FootyError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub training: TrainingConfig,
    pub predict: PredictConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub matches_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub hidden_size: usize,
    pub max_iter: usize,
    pub learning_rate: f64,
    pub alpha: f64,
    pub batch_size: usize,
    pub tol: f64,
    pub n_iter_no_change: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictConfig {
    pub retrain_each_call: bool,
    pub animate: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            hidden_size: 100,
            max_iter: 1000,
            learning_rate: 1e-3,
            alpha: 1e-4,
            batch_size: 200,
            tol: 1e-4,
            n_iter_no_change: 10,
            seed: Some(42),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                matches_path: "data/prem_data_2021-22.csv".to_string(),
            },
            training: TrainingConfig::default(),
            predict: PredictConfig {
                retrain_each_call: false,
                animate: true,
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FootyError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| FootyError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FootyError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_display_names_are_injective() {
        let names: HashSet<_> = Team::ALL.iter().map(|t| t.display_name()).collect();
        let keys: HashSet<_> = Team::ALL.iter().map(|t| t.key()).collect();
        assert_eq!(names.len(), 20);
        assert_eq!(keys.len(), 20);
    }

    #[test]
    fn test_from_input_ignores_case() {
        assert_eq!(Team::from_input("Manchester City"), Some(Team::ManCity));
        let spurs = Team::from_input("  TOTTENHAM HOTSPURS ");
        assert_eq!(spurs, Some(Team::Tottenham));
        assert_eq!(Team::from_input("wEsT hAm"), Some(Team::WestHam));
        for team in Team::ALL {
            assert_eq!(Team::from_input(&team.key().to_uppercase()), Some(team));
        }
    }

    #[test]
    fn test_from_input_rejects_unknown() {
        assert_eq!(Team::from_input("Man City"), None);
        assert_eq!(Team::from_input("tottenham"), None);
        assert_eq!(Team::from_input(""), None);
        assert!("real madrid".parse::<Team>().is_err());
    }

    #[test]
    fn test_statistic_columns() {
        assert_eq!(Statistic::Goals.columns(), ("FTHG", "FTAG"));
        assert_eq!(Statistic::Shots.columns(), ("HS", "AS"));
        assert_eq!(Statistic::Fouls.columns(), ("HF", "AF"));
    }

    #[test]
    fn test_stat_prediction_rounds() {
        let pred = StatPrediction::new(1.23456, 0.987);
        assert_eq!(pred.as_tuple(), (1.23, 0.99));
    }

    #[test]
    fn test_config_round_trip() {
        let path = std::env::temp_dir().join("footy_config_round_trip.toml");
        let path = path.to_string_lossy().to_string();

        let mut config = Config::default();
        config.training.seed = None;
        config.predict.animate = false;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        std::fs::remove_file(&path).ok();
    }
}
