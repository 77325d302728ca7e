//! Season data loaded and encoded once per process

use crate::data::loader::load_matches;
use crate::features::OneHotTable;
use crate::{FootyError, MatchRecord, Result, Statistic};
use std::path::Path;

/// Name of the home-team encoding, as in the CSV header
pub const HOME_TABLE: &str = "HomeTeam";
/// Name of the away-team encoding, as in the CSV header
pub const AWAY_TABLE: &str = "AwayTeam";

/// Historical matches with one-hot home and away team tables
///
/// Built once at startup and shared read-only with every prediction.
#[derive(Debug, Clone)]
pub struct HistoricalData {
    matches: Vec<MatchRecord>,
    home: OneHotTable,
    away: OneHotTable,
}

impl HistoricalData {
    /// Load the season CSV and encode both team columns
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let matches = load_matches(path)?;
        Self::from_matches(matches)
    }

    pub fn from_matches(matches: Vec<MatchRecord>) -> Result<Self> {
        if matches.is_empty() {
            return Err(FootyError::EmptyDataset("match list".to_string()));
        }

        let home_names: Vec<&str> = matches.iter().map(|m| m.home_team.as_str()).collect();
        let away_names: Vec<&str> = matches.iter().map(|m| m.away_team.as_str()).collect();

        let home = OneHotTable::from_values(HOME_TABLE, &home_names)?;
        let away = OneHotTable::from_values(AWAY_TABLE, &away_names)?;

        log::info!(
            "Encoded {} home teams and {} away teams",
            home.width(),
            away.width()
        );

        Ok(HistoricalData {
            matches,
            home,
            away,
        })
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn home(&self) -> &OneHotTable {
        &self.home
    }

    pub fn away(&self) -> &OneHotTable {
        &self.away
    }

    /// Home and away target columns for a statistic, one value per match
    pub fn targets(&self, stat: Statistic) -> (Vec<f32>, Vec<f32>) {
        self.matches.iter().map(|m| stat.values(m)).unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> HistoricalData {
        HistoricalData::load(format!(
            "{}/tests/fixtures/sample_matches.csv",
            env!("CARGO_MANIFEST_DIR")
        ))
        .unwrap()
    }

    #[test]
    fn test_tables_cover_every_match() {
        let data = fixture();
        assert_eq!(data.len(), 30);
        assert_eq!(data.home().len(), 30);
        assert_eq!(data.away().len(), 30);
        assert_eq!(data.home().width(), 6);
        assert_eq!(data.away().width(), 6);
    }

    #[test]
    fn test_columns_use_display_names() {
        let data = fixture();
        let columns = data.home().encoder().columns();
        assert_eq!(
            columns,
            &["Arsenal", "Chelsea", "Leeds", "Liverpool", "Man City", "Norwich"]
        );
        assert_eq!(data.away().encoder().name(), AWAY_TABLE);
    }

    #[test]
    fn test_targets_follow_statistic() {
        let data = fixture();
        let (home_goals, away_goals) = data.targets(Statistic::Goals);
        let (home_fouls, _) = data.targets(Statistic::Fouls);

        assert_eq!(home_goals.len(), 30);
        assert_eq!(home_goals[0], 3.0);
        assert_eq!(away_goals[0], 2.0);
        assert_eq!(home_fouls[0], 11.0);
    }

    #[test]
    fn test_empty_matches_rejected() {
        assert!(HistoricalData::from_matches(Vec::new()).is_err());
    }
}
