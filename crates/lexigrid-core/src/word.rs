//! Word placements on the grid.
//!
//! A `Word` is a run of letters with a start square and a direction. A
//! `PlayedWord` additionally knows which of its squares were filled this turn;
//! it can only be built by [`crate::resolver::classify_tiles`].

use crate::coord::{Direction, Position};
use serde::{Deserialize, Serialize};

/// Signed scalar identifying a word by start square and direction.
///
/// Horizontal words are negative and vertical words positive. The cell index
/// is offset by one so the two words starting at the origin stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionKey(pub i64);

impl PositionKey {
    pub fn new(start: Position, direction: Direction, width: usize) -> Self {
        let index = (start.row * width + start.col) as i64 + 1;
        match direction {
            Direction::Horizontal => PositionKey(-index),
            Direction::Vertical => PositionKey(index),
        }
    }
}

/// A run of letters placed along one axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub letters: String,
    pub start: Position,
    pub direction: Direction,
}

impl Word {
    /// Create a word; letters are upper-cased
    pub fn new(letters: &str, start: Position, direction: Direction) -> Self {
        Self {
            letters: letters.to_uppercase(),
            start,
            direction,
        }
    }

    /// Number of letters
    pub fn len(&self) -> usize {
        self.letters.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Square holding the last letter
    pub fn end(&self) -> Position {
        self.start.advance(self.direction, self.len().saturating_sub(1))
    }

    /// Both the first and the last square lie on a `height` x `width` board
    pub fn is_fully_on_board(&self, height: usize, width: usize) -> bool {
        if self.is_empty() || self.start.row >= height || self.start.col >= width {
            return false;
        }
        let last = self.len() - 1;
        match self.direction {
            Direction::Horizontal => self
                .start
                .col
                .checked_add(last)
                .is_some_and(|end| end < width),
            Direction::Vertical => self
                .start
                .row
                .checked_add(last)
                .is_some_and(|end| end < height),
        }
    }

    /// Each square of the word with its letter
    pub fn positions(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.letters
            .chars()
            .enumerate()
            .map(move |(i, letter)| (self.start.advance(self.direction, i), letter))
    }

    pub fn covers(&self, pos: Position) -> bool {
        self.positions().any(|(p, _)| p == pos)
    }

    pub fn position_key(&self, width: usize) -> PositionKey {
        PositionKey::new(self.start, self.direction, width)
    }
}

/// A proposed word with each square classified as new or already on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedWord {
    word: Word,
    is_played_tile: Vec<bool>,
}

impl PlayedWord {
    pub(crate) fn new(word: Word, is_played_tile: Vec<bool>) -> Self {
        debug_assert_eq!(word.len(), is_played_tile.len());
        Self {
            word,
            is_played_tile,
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    /// Per letter, whether the square was filled this turn
    pub fn is_played_tile(&self) -> &[bool] {
        &self.is_played_tile
    }

    /// Each square with its letter and whether it is new this turn
    pub fn positions_and_is_played(&self) -> impl Iterator<Item = (Position, char, bool)> + '_ {
        self.word
            .positions()
            .zip(self.is_played_tile.iter())
            .map(|((pos, letter), &new)| (pos, letter, new))
    }

    /// Squares filled this turn with their letters
    pub fn new_tiles(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.positions_and_is_played()
            .filter(|(_, _, new)| *new)
            .map(|(pos, letter, _)| (pos, letter))
    }

    /// Letters that must come off the rack
    pub fn needed_letters(&self) -> Vec<char> {
        self.new_tiles().map(|(_, letter)| letter).collect()
    }

    /// True if at least one letter was already on the board
    pub fn uses_existing_tile(&self) -> bool {
        self.is_played_tile.iter().any(|new| !new)
    }

    /// Word with existing letters masked, e.g. `A####MENT`
    pub fn played_pattern(&self) -> String {
        self.positions_and_is_played()
            .map(|(_, letter, new)| if new { letter } else { '#' })
            .collect()
    }
}
