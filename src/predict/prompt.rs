//! Interactive team selection

use std::io::{BufRead, Write};
use std::time::Duration;

use crate::{Fixture, FootyError, Result, Team};

pub const INVALID_TEAMS_MESSAGE: &str =
    "One or both of the teams you entered are not in the list of teams.";

const LOADING_FRAMES: [char; 4] = ['/', '—', '\\', '|'];

/// Teams chosen at the prompt, possibly incomplete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamSelection {
    pub home: Option<Team>,
    pub away: Option<Team>,
}

impl TeamSelection {
    /// Display names of both teams; fails unless both are set
    pub fn display_names(&self) -> Result<(&'static str, &'static str)> {
        match (self.home, self.away) {
            (Some(home), Some(away)) => Ok((home.display_name(), away.display_name())),
            _ => Err(FootyError::IncompleteSelection),
        }
    }

    pub fn into_fixture(self) -> Result<Fixture> {
        match (self.home, self.away) {
            (Some(home), Some(away)) => Ok(Fixture::new(home, away)),
            _ => Err(FootyError::IncompleteSelection),
        }
    }
}

fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(FootyError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "input closed before both teams were entered",
        )));
    }
    Ok(line)
}

/// Ask for two teams until both are known
///
/// Input is case-insensitive. There is no retry limit; closing the input is an error.
pub fn prompt_teams<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Fixture> {
    loop {
        let team1 = read_answer(input, output, "\nTeam 1: ")?;
        let team2 = read_answer(input, output, "Team 2: ")?;

        let selection = TeamSelection {
            home: Team::from_input(&team1),
            away: Team::from_input(&team2),
        };

        match selection.into_fixture() {
            Ok(fixture) => return Ok(fixture),
            Err(_) => {
                log::debug!("Rejected teams {:?} / {:?}", team1.trim(), team2.trim());
                writeln!(output, "\n{}", INVALID_TEAMS_MESSAGE)?;
            }
        }
    }
}

/// Fixture from command-line teams, or from the interactive prompt if either is missing
///
/// The banner and prompts go to `output`, which need not be stdout.
pub fn select_fixture<R: BufRead, W: Write>(
    home: Option<&str>,
    away: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> Result<Fixture> {
    match (home, away) {
        (Some(home), Some(away)) => Ok(Fixture::new(home.parse()?, away.parse()?)),
        _ => {
            writeln!(output, "{}", banner())?;
            prompt_teams(input, output)
        }
    }
}

/// Welcome banner shown before the interactive prompt
pub fn banner() -> String {
    format!(
        "\n{stars} Welcome to footy {stars}\n\n{}",
        "Predict soccer match statistics from the 2021-22 Premier League Season",
        stars = "*".repeat(25)
    )
}

/// Spin through the loading frames once
pub fn animate_loading<W: Write>(output: &mut W, frame_delay: Duration) -> Result<()> {
    for frame in LOADING_FRAMES {
        write!(output, "\rloading results...{}", frame)?;
        output.flush()?;
        std::thread::sleep(frame_delay);
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<Fixture>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_teams(&mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_accepts_mixed_case() {
        let (result, output) = run("ArSeNaL\nManchester UNITED\n");
        let expected = Fixture::new(Team::Arsenal, Team::ManUnited);
        assert_eq!(result.unwrap(), expected);
        assert!(!output.contains(INVALID_TEAMS_MESSAGE));
    }

    #[test]
    fn test_reprompts_until_valid() {
        let (result, output) = run("arsenal\nreal madrid\nspurs\nchelsea\nwolves\nwest ham\n");
        assert_eq!(result.unwrap(), Fixture::new(Team::Wolves, Team::WestHam));
        assert_eq!(output.matches(INVALID_TEAMS_MESSAGE).count(), 2);
        assert_eq!(output.matches("Team 1: ").count(), 3);
    }

    #[test]
    fn test_closed_input_is_error() {
        let (result, _) = run("arsenal\n");
        assert!(matches!(result, Err(FootyError::Io(_))));
    }

    #[test]
    fn test_incomplete_selection() {
        let selection = TeamSelection {
            home: Some(Team::Chelsea),
            away: None,
        };
        assert!(matches!(
            selection.display_names(),
            Err(FootyError::IncompleteSelection)
        ));
        assert!(matches!(
            TeamSelection::default().into_fixture(),
            Err(FootyError::IncompleteSelection)
        ));

        let complete = TeamSelection {
            home: Some(Team::ManCity),
            away: Some(Team::Tottenham),
        };
        assert_eq!(complete.display_names().unwrap(), ("Man City", "Tottenham"));
    }

    #[test]
    fn test_animate_loading_writes_every_frame() {
        let mut output = Vec::new();
        animate_loading(&mut output, Duration::ZERO).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("loading results...").count(), 4);
        assert!(text.contains("loading results...|"));
    }

    #[test]
    fn test_select_fixture_from_arguments_skips_prompt() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let fixture = select_fixture(
            Some("LEEDS"),
            Some("brighton"),
            &mut input,
            &mut output,
        )
        .unwrap();

        assert_eq!(fixture, Fixture::new(Team::Leeds, Team::Brighton));
        assert!(output.is_empty());
    }

    #[test]
    fn test_select_fixture_rejects_bad_argument() {
        let mut input = Cursor::new(b"arsenal\nchelsea\n".to_vec());
        let mut output = Vec::new();
        let result = select_fixture(
            Some("arsenal"),
            Some("barcelona"),
            &mut input,
            &mut output,
        );

        assert!(matches!(result, Err(FootyError::InvalidTeam(_))));
        assert!(output.is_empty());
    }

    #[test]
    fn test_select_fixture_prompts_only_on_given_writer() {
        let mut input = Cursor::new(b"everton\nnorwich city\n".to_vec());
        let mut prompts = Vec::new();
        let result = select_fixture(Some("everton"), None, &mut input, &mut prompts);
        let fixture = result.unwrap();

        assert_eq!(fixture, Fixture::new(Team::Everton, Team::Norwich));
        let text = String::from_utf8(prompts).unwrap();
        assert!(text.contains("Welcome to footy"));
        assert!(text.contains("Team 1: "));
        assert!(text.contains("Team 2: "));
    }

    #[test]
    fn test_banner() {
        assert!(banner().contains("Welcome to footy"));
    }
}
