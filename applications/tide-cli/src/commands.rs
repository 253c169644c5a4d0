/// Interactive command parsing
use crate::error::{CliError, Result};
use tide_playback::PlayerCommand;

/// One line of interactive input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Forward to the player runtime
    Player(PlayerCommand),
    /// Leave the interactive session
    Quit,
    /// Print command help
    Help,
}

pub const HELP: &str = "\
commands:
  play            toggle play/pause
  next | prev     skip forward/back
  shuffle         toggle shuffle
  repeat          toggle repeat
  seek <ratio>    seek to a fraction of the track (0.0-1.0)
  vol <gain>      set volume (0.0-1.0)
  track <index>   jump to a queue index
  help            show this help
  quit            exit";

/// Parse a line of user input
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    if words.next().is_some() {
        return Err(CliError::InvalidCommand(format!(
            "too many arguments: {}",
            line.trim()
        )));
    }

    let input = match (command.to_ascii_lowercase().as_str(), argument) {
        ("play" | "pause" | "p", None) => Input::Player(PlayerCommand::TogglePlay),
        ("next" | "n", None) => Input::Player(PlayerCommand::Next),
        ("prev" | "previous", None) => Input::Player(PlayerCommand::Previous),
        ("shuffle", None) => Input::Player(PlayerCommand::ToggleShuffle),
        ("repeat", None) => Input::Player(PlayerCommand::ToggleRepeat),
        ("seek", Some(value)) => Input::Player(PlayerCommand::SeekTo(parse_number(value)?)),
        ("vol" | "volume", Some(value)) => {
            Input::Player(PlayerCommand::SetVolume(parse_number(value)?))
        }
        ("track", Some(value)) => {
            let index = value.parse::<usize>().map_err(|_| {
                CliError::InvalidCommand(format!("expected a queue index, got {:?}", value))
            })?;
            Input::Player(PlayerCommand::SelectTrack(index))
        }
        ("help" | "?", None) => Input::Help,
        ("quit" | "exit" | "q", None) => Input::Quit,
        (other, _) => {
            return Err(CliError::InvalidCommand(format!(
                "unknown command or arguments: {}",
                other
            )))
        }
    };

    Ok(Some(input))
}

fn parse_number(value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(CliError::InvalidCommand(format!(
            "expected a number, got {:?}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transport_commands() {
        assert_eq!(
            parse_line("play").unwrap(),
            Some(Input::Player(PlayerCommand::TogglePlay))
        );
        assert_eq!(
            parse_line("  NEXT ").unwrap(),
            Some(Input::Player(PlayerCommand::Next))
        );
        assert_eq!(
            parse_line("prev").unwrap(),
            Some(Input::Player(PlayerCommand::Previous))
        );
        assert_eq!(parse_line("quit").unwrap(), Some(Input::Quit));
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(
            parse_line("seek 0.5").unwrap(),
            Some(Input::Player(PlayerCommand::SeekTo(0.5)))
        );
        assert_eq!(
            parse_line("vol 1.5").unwrap(),
            Some(Input::Player(PlayerCommand::SetVolume(1.5)))
        );
        assert_eq!(
            parse_line("track 2").unwrap(),
            Some(Input::Player(PlayerCommand::SelectTrack(2)))
        );
    }

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("seek").is_err());
        assert!(parse_line("seek half").is_err());
        assert!(parse_line("seek NaN").is_err());
        assert!(parse_line("track -1").is_err());
        assert!(parse_line("next 2").is_err());
        assert!(parse_line("vol 0.5 0.6").is_err());
        assert!(parse_line("rewind").is_err());
    }
}
