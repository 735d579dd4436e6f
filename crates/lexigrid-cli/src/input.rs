//! Text commands typed at the prompt.
//!
//! Grammar, case-insensitive:
//! - `play WORD H8 right` or `play WORD 8 H down`
//! - `exchange AEI`, `pass`, `skip`, `challenge`, `end`, `save [file]`
//! - `@NAME challenge` for a challenge by someone not on turn
//! - `help`, `board`, `scores`

use lexigrid_core::{Direction, Move};
use thiserror::Error;

/// A parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A move for the game engine
    Move(Move),
    /// A challenge by the named player, who may not be on turn
    ChallengeBy(String),
    Help,
    Board,
    Scores,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command '{0}', type help for options")]
    UnknownCommand(String),

    #[error("No letters given to exchange")]
    MissingLetters,

    #[error("Usage: play WORD H8 right | play WORD 8 H down")]
    PlayUsage,

    #[error("Cannot read '{0}' as a square, expected something like H8")]
    BadCoordinate(String),

    #[error("Invalid direction '{0}', use right or down")]
    BadDirection(String),

    #[error("No player named after @")]
    MissingPlayer,

    #[error("Only a challenge can be made out of turn, not '{0}'")]
    OutOfTurn(String),
}

pub const HELP: &str = "\
Move options:
  play <WORD> <COL><ROW> <right|down>   e.g. play HELLO D8 right
  play <WORD> <ROW> <COL> <right|down>  e.g. play HELLO 8 D right
  exchange <LETTERS>                     e.g. exchange AEI
  pass                                   give up your turn
  skip                                   use up a forfeited turn
  challenge                              dispute the previous play
  @NAME challenge                        dispute it as another player
  save [FILE]                            write the game to disk
  end                                    finish the game
  board, scores, help
";

/// Parse one line of input
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (action, rest) = tokens.split_first().ok_or(InputError::Empty)?;

    if let Some(name) = action.strip_prefix('@') {
        if name.is_empty() {
            return Err(InputError::MissingPlayer);
        }
        return match rest {
            [challenge] if is_challenge(challenge) => Ok(Command::ChallengeBy(name.to_string())),
            _ => Err(InputError::OutOfTurn(rest.join(" "))),
        };
    }

    let command = match action.to_lowercase().as_str() {
        "help" | "h" | "?" => Command::Help,
        "board" | "b" => Command::Board,
        "scores" | "score" => Command::Scores,
        "end" | "exit" | "quit" | "q" => Command::Move(Move::End),
        "pass" | "ps" => Command::Move(Move::Pass),
        "skip" | "skipturn" => Command::Move(Move::Skip),
        "challenge" | "ch" | "chalenge" => Command::Move(Move::challenge()),
        "exchange" | "ex" => {
            let letters: Vec<char> = rest
                .iter()
                .flat_map(|t| t.chars())
                .filter(|c| c.is_alphabetic())
                .flat_map(char::to_uppercase)
                .collect();
            if letters.is_empty() {
                return Err(InputError::MissingLetters);
            }
            Command::Move(Move::Exchange { letters })
        }
        "play" | "pl" | "paly" => Command::Move(parse_play(rest)?),
        "save" => Command::Move(Move::Save {
            location: remainder(line).map(str::to_string),
        }),
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}

fn is_challenge(token: &str) -> bool {
    matches!(
        token.to_lowercase().as_str(),
        "challenge" | "ch" | "chalenge"
    )
}

/// Everything after the first token, inner spacing kept
fn remainder(line: &str) -> Option<&str> {
    line.trim()
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
}

fn parse_play(tokens: &[&str]) -> Result<Move, InputError> {
    let (word, (row, col), direction) = match tokens {
        [word, square, direction] => (word, parse_square(square)?, direction),
        [word, row, col, direction] => {
            let row = parse_row(row).ok_or_else(|| InputError::BadCoordinate(row.to_string()))?;
            let col = parse_col(col).ok_or_else(|| InputError::BadCoordinate(col.to_string()))?;
            (word, (row, col), direction)
        }
        _ => return Err(InputError::PlayUsage),
    };

    Ok(Move::Play {
        word: word.to_uppercase(),
        row,
        col,
        direction: parse_direction(direction)?,
    })
}

/// `H8` or `8H` to zero-based `(row, col)`
pub fn parse_square(square: &str) -> Result<(usize, usize), InputError> {
    let bad = || InputError::BadCoordinate(square.to_string());
    let letters: String = square.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    let digits: String = square.chars().filter(|c| c.is_ascii_digit()).collect();
    if letters.len() != 1 || digits.is_empty() || letters.len() + digits.len() != square.len() {
        return Err(bad());
    }
    let row = parse_row(&digits).ok_or_else(bad)?;
    let col = parse_col(&letters).ok_or_else(bad)?;
    Ok((row, col))
}

/// One-based row number
fn parse_row(token: &str) -> Option<usize> {
    token.parse::<usize>().ok()?.checked_sub(1)
}

/// Column letter, or a one-based column number
fn parse_col(token: &str) -> Option<usize> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
        }
        _ => parse_row(token),
    }
}

fn parse_direction(token: &str) -> Result<Direction, InputError> {
    match token.to_lowercase().as_str() {
        "right" | "r" | "horizontal" | "h" | "across" => Ok(Direction::Horizontal),
        "down" | "d" | "vertical" | "v" => Ok(Direction::Vertical),
        other => Err(InputError::BadDirection(other.to_string())),
    }
}
