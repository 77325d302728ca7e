//! Forecast formatting

use serde::Serialize;

use crate::{Fixture, FootyError, Result, StatPrediction};

/// Predicted goals, shots and fouls for a fixture
#[derive(Debug, Clone, PartialEq)]
pub struct MatchForecast {
    pub fixture: Fixture,
    pub goals: StatPrediction,
    pub shots: StatPrediction,
    pub fouls: StatPrediction,
}

impl MatchForecast {
    /// Display name of the team with more predicted goals, or "Draw"
    pub fn winner(&self) -> &'static str {
        determine_winner(
            self.fixture.home.display_name(),
            self.fixture.away.display_name(),
            self.goals.as_tuple(),
        )
    }
}

/// Pick the winner from predicted goals; exactly equal goals is a draw
pub fn determine_winner<'a, T: PartialOrd>(
    home: &'a str,
    away: &'a str,
    goals: (T, T),
) -> &'a str {
    if goals.0 > goals.1 {
        home
    } else if goals.1 > goals.0 {
        away
    } else {
        "Draw"
    }
}

/// Format a forecast for the terminal
pub fn format_forecast(forecast: &MatchForecast) -> String {
    let home = forecast.fixture.home.display_name();
    let away = forecast.fixture.away.display_name();

    let mut out = format!(
        "\n************ {} vs. {} ************\n\nWinner: {}\n\n",
        home,
        away,
        forecast.winner()
    );
    for (label, pred) in [
        ("Goals", forecast.goals),
        ("Shots", forecast.shots),
        ("Fouls", forecast.fouls),
    ] {
        out.push_str(&format!(
            "{} -> {}: {:.2}, {}: {:.2}\n\n",
            label, home, pred.home, away, pred.away
        ));
    }
    out
}

/// Forecast as written to JSON, with display names and the winner resolved
#[derive(Debug, Serialize)]
struct ForecastReport {
    home: &'static str,
    away: &'static str,
    winner: &'static str,
    goals: StatPrediction,
    shots: StatPrediction,
    fouls: StatPrediction,
}

impl From<&MatchForecast> for ForecastReport {
    fn from(forecast: &MatchForecast) -> Self {
        ForecastReport {
            home: forecast.fixture.home.display_name(),
            away: forecast.fixture.away.display_name(),
            winner: forecast.winner(),
            goals: forecast.goals,
            shots: forecast.shots,
            fouls: forecast.fouls,
        }
    }
}

/// Format a forecast as pretty-printed JSON
pub fn forecast_json(forecast: &MatchForecast) -> Result<String> {
    serde_json::to_string_pretty(&ForecastReport::from(forecast))
        .map_err(|e| FootyError::Model(format!("Failed to serialize forecast: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Team;

    fn forecast(home_goals: f64, away_goals: f64) -> MatchForecast {
        MatchForecast {
            fixture: Fixture::new(Team::Arsenal, Team::ManCity),
            goals: StatPrediction::new(home_goals, away_goals),
            shots: StatPrediction::new(14.256, 16.1),
            fouls: StatPrediction::new(9.0, 10.5),
        }
    }

    #[test]
    fn test_determine_winner() {
        assert_eq!(determine_winner("Arsenal", "Chelsea", (2, 1)), "Arsenal");
        assert_eq!(determine_winner("Arsenal", "Chelsea", (1, 2)), "Chelsea");
        assert_eq!(determine_winner("Arsenal", "Chelsea", (1, 1)), "Draw");
        assert_eq!(determine_winner("Leeds", "Wolves", (1.25, 1.24)), "Leeds");
    }

    #[test]
    fn test_forecast_winner_uses_goals() {
        assert_eq!(forecast(1.5, 1.2).winner(), "Arsenal");
        assert_eq!(forecast(0.8, 2.1).winner(), "Man City");
        assert_eq!(forecast(1.33, 1.33).winner(), "Draw");
    }

    #[test]
    fn test_format_forecast() {
        let text = format_forecast(&forecast(1.5, 1.2));
        let title = "************ Arsenal vs. Man City ************";
        assert!(text.contains(title));
        assert!(text.contains("Winner: Arsenal"));
        assert!(text.contains("Goals -> Arsenal: 1.50, Man City: 1.20"));
        assert!(text.contains("Shots -> Arsenal: 14.26, Man City: 16.10"));
        assert!(text.contains("Fouls -> Arsenal: 9.00, Man City: 10.50"));
    }

    #[test]
    fn test_forecast_json() {
        let json = forecast_json(&forecast(1.33, 1.33)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["winner"], "Draw");
        assert_eq!(value["away"], "Man City");
        assert_eq!(value["goals"]["home"], 1.33);
        assert_eq!(value["shots"]["home"], 14.26);
    }

    #[test]
    fn test_forecast_json_fields() {
        let json = forecast_json(&forecast(2.0, 0.5)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        let expected = ["away", "fouls", "goals", "home", "shots", "winner"];
        assert_eq!(keys, expected);
        assert_eq!(value["winner"], "Arsenal");
        assert_eq!(value["fouls"]["away"], 10.5);
    }
}
