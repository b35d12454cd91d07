use std::str::FromStr;

use sweeper_core::{Coord, Coord2};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  r <row> <col>   reveal a cell
  f <row> <col>   place or remove a flag
  n               start a new game
  h               show this help
  q               quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command, type h for help")]
    Empty,
    #[error("Unknown command {0:?}, type h for help")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("Invalid number {0:?}")]
    InvalidNumber(String),
    #[error("Unexpected input {0:?}")]
    Trailing(String),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();

        let command = match name.as_str() {
            "r" | "reveal" | "o" | "open" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "n" | "new" => Self::NewGame,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(ParseError::Unknown(name)),
        };

        match words.next() {
            Some(extra) => Err(ParseError::Trailing(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, ParseError> {
    let row = parse_coord(words.next().ok_or(ParseError::MissingCoords)?)?;
    let col = parse_coord(words.next().ok_or(ParseError::MissingCoords)?)?;
    Ok((row, col))
}

/// Large values saturate to `Coord::MAX`, which is past the last index of any grid, so the
/// board rejects them like any other out-of-range click.
fn parse_coord(word: &str) -> Result<Coord, ParseError> {
    let value: usize = word
        .parse()
        .map_err(|_| ParseError::InvalidNumber(word.to_owned()))?;
    Ok(Coord::try_from(value).unwrap_or(Coord::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_coords() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  Open 0 12 ".parse::<Command>(), Ok(Command::Reveal((0, 12))));
        assert_eq!("f 1 2".parse::<Command>(), Ok(Command::Flag((1, 2))));
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!("n".parse::<Command>(), Ok(Command::NewGame));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("QUIT".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn huge_coords_saturate() {
        assert_eq!("r 4000 1".parse::<Command>(), Ok(Command::Reveal((Coord::MAX, 1))));
    }

    #[test]
    fn reports_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(ParseError::Unknown("dig".to_owned()))
        );
        assert_eq!("r 1".parse::<Command>(), Err(ParseError::MissingCoords));
        assert_eq!(
            "f -1 2".parse::<Command>(),
            Err(ParseError::InvalidNumber("-1".to_owned()))
        );
        assert_eq!(
            "n now".parse::<Command>(),
            Err(ParseError::Trailing("now".to_owned()))
        );
    }
}
