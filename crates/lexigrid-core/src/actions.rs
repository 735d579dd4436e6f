//! Moves that players can make.
//!
//! This module defines every move a player can submit, the outcome of
//! processing one, and the events that result.

use crate::board::PlayerId;
use crate::coord::{Direction, Position};
use crate::error::MoveError;
use serde::{Deserialize, Serialize};

/// All possible moves a player can make
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    // ==================== Turn Moves ====================
    /// Lay a word starting at `(row, col)`
    Play {
        word: String,
        row: usize,
        col: usize,
        direction: Direction,
    },
    /// Give up the turn voluntarily
    Pass,
    /// Give up a turn forfeited by a failed challenge
    Skip,
    /// Swap rack letters for fresh ones from the pool
    Exchange { letters: Vec<char> },

    // ==================== Out of Turn ====================
    /// Dispute the previous play. `by` names a challenger other than the
    /// player on turn; `None` means the player on turn.
    Challenge { by: Option<PlayerId> },

    // ==================== Game Management ====================
    /// Finish the game now
    End,
    /// Ask the caller to persist the game; `None` uses the default location
    Save { location: Option<String> },
}

impl Move {
    /// Convenience constructor for a play
    pub fn play(word: &str, row: usize, col: usize, direction: Direction) -> Self {
        Move::Play {
            word: word.to_string(),
            row,
            col,
            direction,
        }
    }

    /// Convenience constructor for an exchange
    pub fn exchange(letters: &str) -> Self {
        Move::Exchange {
            letters: letters.chars().collect(),
        }
    }

    /// A challenge by the player on turn
    pub fn challenge() -> Self {
        Move::Challenge { by: None }
    }

    /// A challenge by `player`, who need not be on turn
    pub fn challenge_by(player: PlayerId) -> Self {
        Move::Challenge { by: Some(player) }
    }

    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Play { .. } => MoveKind::Play,
            Move::Pass => MoveKind::Pass,
            Move::Skip => MoveKind::Skip,
            Move::Exchange { .. } => MoveKind::Exchange,
            Move::Challenge { .. } => MoveKind::Challenge,
            Move::End => MoveKind::End,
            Move::Save { .. } => MoveKind::Save,
        }
    }
}

/// The variant of a [`Move`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Play,
    Pass,
    Skip,
    Exchange,
    Challenge,
    End,
    Save,
}

/// Outcome of one state machine step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    /// The move was applied
    Next,
    /// The move was rejected; nothing changed
    Retry(MoveError),
    /// The game is over
    End,
}

/// A processed move as kept in the game history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Player who made the move
    pub player: PlayerId,
    /// Turn number when it was made
    pub turn: u32,
    pub action: Move,
    /// Squares filled by a play
    pub placed: Vec<Position>,
    /// Index of the resulting entry in the player's score history
    pub score_index: Option<usize>,
}

/// Events that occur as a result of moves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A word was laid on the board
    WordPlayed {
        player: PlayerId,
        words: Vec<String>,
        score: u32,
        is_bingo: bool,
    },

    /// Tiles were drawn to refill a rack
    TilesDrawn { player: PlayerId, count: usize },

    /// A player passed
    TurnPassed { player: PlayerId },

    /// A forfeited turn was used up
    TurnSkipped { player: PlayerId },

    /// Letters were swapped with the pool
    TilesExchanged { player: PlayerId, count: usize },

    /// The previous play was invalid and has been taken back
    ChallengeSucceeded {
        challenger: PlayerId,
        challenged: PlayerId,
        voided_score: u32,
        bonus: u32,
    },

    /// The previous play stood; the challenger loses their next turn
    ChallengeFailed {
        challenger: PlayerId,
        challenged: PlayerId,
    },

    /// The caller should persist the game
    SaveRequested { location: Option<String> },

    /// Turn passed to the next player
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },

    /// The game is over
    GameEnded { winner: Option<PlayerId> },
}
