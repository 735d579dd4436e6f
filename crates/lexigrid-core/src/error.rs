//! Error types.
//!
//! `MoveError` is the reason attached to a rejected move. Every variant is
//! recoverable: the game state is left exactly as it was and the same player
//! may try again.

use crate::board::PlayerId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when applying a move
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveError {
    #[error("Word does not fit on the board")]
    OutOfBounds,

    #[error("Letter {expected} conflicts with {found} already at row {row}, column {col}")]
    LetterConflict {
        row: usize,
        col: usize,
        expected: char,
        found: char,
    },

    #[error("Word must connect to existing tiles")]
    NotConnected,

    #[error("First move must cover the opening square")]
    MissingOpeningCoverage,

    #[error("Rack does not hold the letters {needed}")]
    InsufficientRackLetters { needed: String },

    #[error("Nothing to challenge: {0}")]
    InvalidChallengeTarget(String),

    #[error("Malformed move: {0}")]
    MalformedMove(String),

    #[error("Not enough tiles left in the pool to exchange")]
    InsufficientPoolTiles,

    #[error("This turn is forfeited after a failed challenge")]
    TurnForfeited,

    #[error("No player with id {0}")]
    UnknownPlayer(PlayerId),

    #[error("Game is over")]
    GameOver,
}

/// Errors from loading letters onto a board in bulk
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Position row {row}, column {col} is off the board")]
    OutOfRange { row: usize, col: usize },

    #[error("Row {row} has {len} cells but the board is {width} wide")]
    RowTooLong { row: usize, len: usize, width: usize },

    #[error("'{letter}' at row {row}, column {col} is not a letter")]
    InvalidLetter { row: usize, col: usize, letter: char },
}

/// Errors from validating a [`GameConfig`](crate::config::GameConfig)
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("Board must have at least one row and column")]
    EmptyBoard,

    #[error("Rack size must be positive")]
    EmptyRack,

    #[error("Square row {row}, column {col} is off the board")]
    SquareOutOfRange { row: usize, col: usize },

    #[error("Letter {0} is in the tile distribution but has no value")]
    MissingLetterValue(char),
}

/// Errors from restoring a game from a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SnapshotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Snapshot board is {height}x{width}, config expects {expected_height}x{expected_width}")]
    BoardSize {
        height: usize,
        width: usize,
        expected_height: usize,
        expected_width: usize,
    },

    #[error("Snapshot has no players")]
    NoPlayers,

    #[error("Current player {0} is not in the game")]
    UnknownPlayer(PlayerId),

    #[error("Snapshot board cells do not form a {height}x{width} grid")]
    CellGrid { height: usize, width: usize },

    #[error("Player in seat {seat} has id {id}")]
    SeatMismatch { seat: usize, id: PlayerId },

    #[error("Player {player} has score {recorded} but their history adds up to {expected}")]
    ScoreMismatch {
        player: PlayerId,
        recorded: u32,
        expected: u32,
    },

    #[error("Move {index} in the history belongs to unknown player {player}")]
    UnknownMovePlayer { index: usize, player: PlayerId },
}
