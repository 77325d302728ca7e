//! CSV loading for season match data
//!
//! Expects the football-data.co.uk column layout. Only the columns below are read;
//! the rest (odds, referee, half-time stats) are ignored.

use crate::{FootyError, MatchRecord, Result, Statistic};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date", default)]
    date: Option<String>,
    #[serde(rename = "HomeTeam")]
    home_team: String,
    #[serde(rename = "AwayTeam")]
    away_team: String,
    #[serde(rename = "FTHG")]
    home_goals: u8,
    #[serde(rename = "FTAG")]
    away_goals: u8,
    #[serde(rename = "HS")]
    home_shots: u8,
    #[serde(rename = "AS")]
    away_shots: u8,
    #[serde(rename = "HF")]
    home_fouls: u8,
    #[serde(rename = "AF")]
    away_fouls: u8,
}

impl CsvRow {
    fn into_record(self) -> MatchRecord {
        MatchRecord {
            date: self.date.as_deref().and_then(parse_date),
            home_team: self.home_team.trim().to_string(),
            away_team: self.away_team.trim().to_string(),
            home_goals: self.home_goals,
            away_goals: self.away_goals,
            home_shots: self.home_shots,
            away_shots: self.away_shots,
            home_fouls: self.home_fouls,
            away_fouls: self.away_fouls,
        }
    }
}

/// Parse a match date (dd/mm/yyyy, or dd/mm/yy in older seasons)
///
/// `%Y` also accepts two digits, so the short form has to be tried first.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d/%m/%y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}

/// Load all match records from a CSV file
pub fn load_matches<P: AsRef<Path>>(path: P) -> Result<Vec<MatchRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        records.push(row?.into_record());
    }

    if records.is_empty() {
        return Err(FootyError::EmptyDataset(path.display().to_string()));
    }

    log::info!("Loaded {} matches from {}", records.len(), path.display());
    Ok(records)
}

/// Summary of a loaded season, for `footy data status`
#[derive(Debug, Clone)]
pub struct DataSummary {
    pub match_count: usize,
    pub team_count: usize,
    pub earliest_match: Option<NaiveDate>,
    pub latest_match: Option<NaiveDate>,
    /// Mean (home, away) value per statistic
    pub averages: Vec<(Statistic, f32, f32)>,
}

impl DataSummary {
    pub fn from_matches(matches: &[MatchRecord]) -> Self {
        let teams: BTreeSet<&str> = matches
            .iter()
            .flat_map(|m| [m.home_team.as_str(), m.away_team.as_str()])
            .collect();

        let n = matches.len().max(1) as f32;
        let averages = Statistic::ALL
            .iter()
            .map(|stat| {
                let (home, away) = matches.iter().fold((0.0f32, 0.0f32), |(h, a), m| {
                    let (mh, ma) = stat.values(m);
                    (h + mh, a + ma)
                });
                (*stat, home / n, away / n)
            })
            .collect();

        DataSummary {
            match_count: matches.len(),
            team_count: teams.len(),
            earliest_match: matches.iter().filter_map(|m| m.date).min(),
            latest_match: matches.iter().filter_map(|m| m.date).max(),
            averages,
        }
    }
}

impl fmt::Display for DataSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Matches:  {}", self.match_count)?;
        writeln!(f, "  Teams:    {}", self.team_count)?;
        if let (Some(earliest), Some(latest)) = (self.earliest_match, self.latest_match) {
            writeln!(f, "  Range:    {} to {}", earliest, latest)?;
        }
        for (stat, home, away) in &self.averages {
            let label = format!("{}:", stat);
            writeln!(f, "  {:<8}  home {:.2}, away {:.2}", label, home, away)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_path() -> String {
        format!("{}/tests/fixtures/sample_matches.csv", env!("CARGO_MANIFEST_DIR"))
    }

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_fixture() {
        let matches = load_matches(fixture_path()).unwrap();
        assert_eq!(matches.len(), 30);

        let first = &matches[0];
        assert_eq!(first.home_team, "Arsenal");
        assert_eq!(first.away_team, "Chelsea");
        assert_eq!(first.home_goals, 3);
        assert_eq!(first.away_goals, 2);
        assert_eq!(first.home_shots, 17);
        assert_eq!(first.away_fouls, 12);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2021, 8, 16));
    }

    #[test]
    fn test_missing_file() {
        let err = load_matches("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, FootyError::Io(_)));
    }

    #[test]
    fn test_malformed_row() {
        let path = write_temp(
            "footy_malformed.csv",
            "HomeTeam,AwayTeam,FTHG,FTAG,HS,AS,HF,AF\nArsenal,Chelsea,two,1,10,8,9,12\n",
        );
        let err = load_matches(&path).unwrap_err();
        assert!(matches!(err, FootyError::Csv(_)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_column() {
        let path = write_temp(
            "footy_missing_column.csv",
            "HomeTeam,AwayTeam,FTHG,FTAG,HS,AS,HF\nArsenal,Chelsea,2,1,10,8,9\n",
        );
        assert!(load_matches(&path).is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_empty_file() {
        let path = write_temp(
            "footy_empty.csv",
            "HomeTeam,AwayTeam,FTHG,FTAG,HS,AS,HF,AF\n",
        );
        let err = load_matches(&path).unwrap_err();
        assert!(matches!(err, FootyError::EmptyDataset(_)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 8, 13);
        assert_eq!(parse_date("13/08/2021"), expected);
        assert_eq!(parse_date("13/08/21"), expected);
        assert_eq!(parse_date("2021-08-13"), None);
    }

    #[test]
    fn test_summary_range_with_short_years() {
        let path = write_temp(
            "footy_short_years.csv",
            "Date,HomeTeam,AwayTeam,FTHG,FTAG,HS,AS,HF,AF\n\
             13/08/21,Brentford,Arsenal,2,0,8,22,12,8\n\
             22/05/22,Arsenal,Everton,5,1,15,6,7,11\n",
        );
        let matches = load_matches(&path).unwrap();
        let summary = DataSummary::from_matches(&matches);

        assert_eq!(summary.earliest_match, NaiveDate::from_ymd_opt(2021, 8, 13));
        assert_eq!(summary.latest_match, NaiveDate::from_ymd_opt(2022, 5, 22));
        assert!(summary.to_string().contains("2021-08-13 to 2022-05-22"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_summary() {
        let matches = load_matches(fixture_path()).unwrap();
        let summary = DataSummary::from_matches(&matches);

        assert_eq!(summary.match_count, 30);
        assert_eq!(summary.team_count, 6);
        assert_eq!(summary.earliest_match, NaiveDate::from_ymd_opt(2021, 8, 16));
        assert!(summary.latest_match > summary.earliest_match);
        assert_eq!(summary.averages.len(), 3);
        assert!(summary.to_string().contains("Matches:  30"));
    }
}
