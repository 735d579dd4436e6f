//! Static game configuration: board size, bonus layout, letter tables.
//!
//! The engine never hard-codes these tables; everything flows from a
//! [`GameConfig`], so a custom board or language set can be loaded from JSON.

use crate::board::Bonus;
use crate::coord::Position;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bonus awarded once per turn for playing a full rack
pub const BINGO_BONUS: u32 = 50;

/// Bonus awarded to a player whose challenge succeeds
pub const CHALLENGE_BONUS: u32 = 10;

/// Tiles held by each player
pub const RACK_SIZE: usize = 7;

/// Standard board dimension (both axes)
pub const STANDARD_SIZE: usize = 15;

const TRIPLE_WORD: [(usize, usize); 8] = [
    (0, 0),
    (0, 7),
    (0, 14),
    (7, 0),
    (7, 14),
    (14, 0),
    (14, 7),
    (14, 14),
];

const DOUBLE_WORD: [(usize, usize); 16] = [
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (1, 13),
    (2, 12),
    (3, 11),
    (4, 10),
    (13, 1),
    (12, 2),
    (11, 3),
    (10, 4),
    (13, 13),
    (12, 12),
    (11, 11),
    (10, 10),
];

const TRIPLE_LETTER: [(usize, usize); 12] = [
    (1, 5),
    (1, 9),
    (5, 1),
    (5, 5),
    (5, 9),
    (5, 13),
    (9, 1),
    (9, 5),
    (9, 9),
    (9, 13),
    (13, 5),
    (13, 9),
];

const DOUBLE_LETTER: [(usize, usize); 24] = [
    (0, 3),
    (0, 11),
    (2, 6),
    (2, 8),
    (3, 0),
    (3, 7),
    (3, 14),
    (6, 2),
    (6, 6),
    (6, 8),
    (6, 12),
    (7, 3),
    (7, 11),
    (8, 2),
    (8, 6),
    (8, 8),
    (8, 12),
    (11, 0),
    (11, 7),
    (11, 14),
    (12, 6),
    (12, 8),
    (14, 3),
    (14, 11),
];

/// A bonus square in the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusSquare {
    pub row: usize,
    pub col: usize,
    pub bonus: Bonus,
}

/// Everything the engine needs to know about the board and tile set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board_height: usize,
    pub board_width: usize,
    /// Cell the opening move must cover
    pub opening: Position,
    pub rack_size: usize,
    pub bingo_bonus: u32,
    pub challenge_bonus: u32,
    /// Points per letter
    pub letter_values: BTreeMap<char, u32>,
    /// How many tiles of each letter are in the pool at game start
    pub tile_distribution: BTreeMap<char, u32>,
    /// Premium squares; the opening cell is marked separately
    pub bonus_layout: Vec<BonusSquare>,
}

impl GameConfig {
    /// The standard 15x15 board with English letter values.
    ///
    /// The distribution omits blank tiles, leaving 98 letters.
    pub fn standard() -> Self {
        let mut bonus_layout = Vec::new();
        let groups: [(&[(usize, usize)], Bonus); 4] = [
            (&TRIPLE_WORD, Bonus::TripleWord),
            (&DOUBLE_WORD, Bonus::DoubleWord),
            (&TRIPLE_LETTER, Bonus::TripleLetter),
            (&DOUBLE_LETTER, Bonus::DoubleLetter),
        ];
        for (squares, bonus) in groups {
            for &(row, col) in squares {
                bonus_layout.push(BonusSquare { row, col, bonus });
            }
        }

        Self {
            board_height: STANDARD_SIZE,
            board_width: STANDARD_SIZE,
            opening: Position::new(STANDARD_SIZE / 2, STANDARD_SIZE / 2),
            rack_size: RACK_SIZE,
            bingo_bonus: BINGO_BONUS,
            challenge_bonus: CHALLENGE_BONUS,
            letter_values: standard_letter_values(),
            tile_distribution: standard_distribution(),
            bonus_layout,
        }
    }

    /// Point value of a letter (0 for letters missing from the table)
    pub fn letter_value(&self, letter: char) -> u32 {
        self.letter_values.get(&letter).copied().unwrap_or(0)
    }

    /// Whether `letter` has a value, compared upper-cased
    pub fn is_tile_letter(&self, letter: char) -> bool {
        letter
            .to_uppercase()
            .all(|c| self.letter_values.contains_key(&c))
    }

    /// Total number of tiles in a fresh pool
    pub fn total_tiles(&self) -> u32 {
        self.tile_distribution.values().sum()
    }

    /// Check that the configuration describes a playable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_height == 0 || self.board_width == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.rack_size == 0 {
            return Err(ConfigError::EmptyRack);
        }
        if self.opening.row >= self.board_height || self.opening.col >= self.board_width {
            return Err(ConfigError::SquareOutOfRange {
                row: self.opening.row,
                col: self.opening.col,
            });
        }
        for square in &self.bonus_layout {
            if square.row >= self.board_height || square.col >= self.board_width {
                return Err(ConfigError::SquareOutOfRange {
                    row: square.row,
                    col: square.col,
                });
            }
        }
        for letter in self.tile_distribution.keys() {
            if !self.letter_values.contains_key(letter) {
                return Err(ConfigError::MissingLetterValue(*letter));
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_letter_values() -> BTreeMap<char, u32> {
    let mut values = BTreeMap::new();
    let table: [(&str, u32); 7] = [
        ("AEILNORSTU", 1),
        ("DG", 2),
        ("BCMP", 3),
        ("FHVWY", 4),
        ("K", 5),
        ("JX", 8),
        ("QZ", 10),
    ];
    for (letters, points) in table {
        for letter in letters.chars() {
            values.insert(letter, points);
        }
    }
    values
}

fn standard_distribution() -> BTreeMap<char, u32> {
    [
        ('A', 9),
        ('B', 2),
        ('C', 2),
        ('D', 4),
        ('E', 12),
        ('F', 2),
        ('G', 3),
        ('H', 2),
        ('I', 9),
        ('J', 1),
        ('K', 1),
        ('L', 4),
        ('M', 2),
        ('N', 6),
        ('O', 8),
        ('P', 2),
        ('Q', 1),
        ('R', 6),
        ('S', 4),
        ('T', 6),
        ('U', 4),
        ('V', 2),
        ('W', 2),
        ('X', 1),
        ('Y', 2),
        ('Z', 1),
    ]
    .into_iter()
    .collect()
}
