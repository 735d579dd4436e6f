//! Game board representation.
//!
//! This module contains:
//! - Bonus square kinds
//! - The `Cell` type holding a letter and who placed it
//! - The `Board` grid with placement and bulk import/export
//!
//! The board knows nothing about words or scores. It only guarantees that a
//! letter is never written over another one.

use crate::config::GameConfig;
use crate::coord::Position;
use crate::error::BoardError;
use crate::player::LetterCounts;
use serde::{Deserialize, Serialize};

/// Player identifier (index into the game's player list)
pub type PlayerId = u8;

/// Premium square kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Bonus {
    /// Plain square
    #[default]
    None,
    /// Letter scores double
    DoubleLetter,
    /// Letter scores triple
    TripleLetter,
    /// Word scores double
    DoubleWord,
    /// Word scores triple
    TripleWord,
    /// Opening square, doubles the word like `DoubleWord`
    Center,
}

impl Bonus {
    /// Multiplier applied to the letter on this square
    pub fn letter_multiplier(&self) -> u32 {
        match self {
            Bonus::DoubleLetter => 2,
            Bonus::TripleLetter => 3,
            _ => 1,
        }
    }

    /// Multiplier applied to a whole word crossing this square, if any
    pub fn word_multiplier(&self) -> Option<u32> {
        match self {
            Bonus::DoubleWord | Bonus::Center => Some(2),
            Bonus::TripleWord => Some(3),
            _ => None,
        }
    }

    /// Short label used by text renderers
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Bonus::None => "",
            Bonus::DoubleLetter => "DL",
            Bonus::TripleLetter => "TL",
            Bonus::DoubleWord => "DW",
            Bonus::TripleWord => "TW",
            Bonus::Center => "*",
        }
    }
}

/// A single square on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Cell {
    /// Letter on this square, if any
    pub letter: Option<char>,
    /// Premium printed on the square
    pub bonus: Bonus,
    /// Player who placed the letter
    pub placed_by: Option<PlayerId>,
    /// Turn number on which the letter was placed
    pub turn_placed: Option<u32>,
}

impl Cell {
    /// Create an empty cell with a bonus
    pub fn with_bonus(bonus: Bonus) -> Self {
        Self {
            bonus,
            ..Self::default()
        }
    }

    /// Whether a letter can be placed here
    pub fn is_placeable(&self) -> bool {
        self.letter.is_none()
    }

    fn place(&mut self, letter: char, player: Option<PlayerId>, turn: Option<u32>) -> bool {
        if self.letter.is_some() {
            return false;
        }
        self.letter = Some(letter);
        self.placed_by = player;
        self.turn_placed = turn;
        true
    }

    fn clear(&mut self) -> Option<char> {
        self.placed_by = None;
        self.turn_placed = None;
        self.letter.take()
    }
}

/// A letter at an explicit position, for sparse board snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedLetter {
    pub row: usize,
    pub col: usize,
    pub letter: char,
}

/// Bulk board contents for [`Board::import_snapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardSnapshot {
    /// One string per row, using a placeholder character for empty cells
    Rows(Vec<String>),
    /// Only the occupied cells
    Sparse(Vec<PlacedLetter>),
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    height: usize,
    width: usize,
    /// Square the first word must cover
    opening: Position,
    /// Cells indexed `[row][col]`
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Create an empty board with the bonus layout from a config
    pub fn new(config: &GameConfig) -> Self {
        let mut cells = vec![vec![Cell::default(); config.board_width]; config.board_height];
        for square in &config.bonus_layout {
            if let Some(cell) = cells.get_mut(square.row).and_then(|r| r.get_mut(square.col)) {
                cell.bonus = square.bonus;
            }
        }
        if let Some(cell) = cells
            .get_mut(config.opening.row)
            .and_then(|r| r.get_mut(config.opening.col))
        {
            cell.bonus = Bonus::Center;
        }

        Self {
            height: config.board_height,
            width: config.board_width,
            opening: config.opening,
            cells,
        }
    }

    /// The standard 15x15 board
    pub fn standard() -> Self {
        Self::new(&GameConfig::standard())
    }

    // ==================== Query Methods ====================

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The square the opening word must cover
    pub fn opening(&self) -> Position {
        self.opening
    }

    /// There are `height` rows of exactly `width` cells each
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.height && self.cells.iter().all(|r| r.len() == self.width)
    }

    /// Check a position lies on the board
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Get a cell by position
    pub fn get_cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(pos.row).and_then(|r| r.get(pos.col))
    }

    /// Get the letter at a position
    pub fn get_letter(&self, pos: Position) -> Option<char> {
        self.get_cell(pos).and_then(|c| c.letter)
    }

    /// Get the bonus printed at a position
    pub fn get_bonus(&self, pos: Position) -> Bonus {
        self.get_cell(pos).map(|c| c.bonus).unwrap_or_default()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get_letter(pos).is_some()
    }

    /// True while no letter has been placed
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|c| c.letter.is_none())
    }

    /// Whether any orthogonal neighbour holds a letter
    pub fn has_occupied_neighbour(&self, pos: Position) -> bool {
        pos.neighbours(self.height, self.width)
            .into_iter()
            .any(|n| self.is_occupied(n))
    }

    /// All occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, c)| c.letter.is_some())
                .map(move |(col, c)| (Position::new(row, col), c))
        })
    }

    /// Cells holding letters placed by `player` on `turn`
    pub fn cells_placed_by(&self, player: PlayerId, turn: u32) -> Vec<Position> {
        self.occupied()
            .filter(|(_, c)| c.placed_by == Some(player) && c.turn_placed == Some(turn))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Multiset of every letter on the board
    pub fn letter_counts(&self) -> LetterCounts {
        self.occupied().filter_map(|(_, c)| c.letter).collect()
    }

    // ==================== Mutation Methods ====================

    /// Place a letter. Returns false, leaving the board untouched, if the
    /// square is occupied or off the board.
    pub fn place_tile(&mut self, pos: Position, letter: char, player: PlayerId, turn: u32) -> bool {
        match self.cells.get_mut(pos.row).and_then(|r| r.get_mut(pos.col)) {
            Some(cell) => cell.place(letter, Some(player), Some(turn)),
            None => false,
        }
    }

    /// Empty a square, returning the letter it held
    pub fn clear(&mut self, pos: Position) -> Option<char> {
        self.cells
            .get_mut(pos.row)
            .and_then(|r| r.get_mut(pos.col))
            .and_then(Cell::clear)
    }

    /// Replace the board contents with `snapshot`.
    ///
    /// The snapshot is checked in full before anything changes, so on error
    /// the board is left as it was.
    pub fn import_snapshot(
        &mut self,
        snapshot: &BoardSnapshot,
        empty: char,
        placed_by: Option<PlayerId>,
        turn: Option<u32>,
    ) -> Result<(), BoardError> {
        let letters = self.collect_snapshot_letters(snapshot, empty)?;

        for cell in self.cells.iter_mut().flatten() {
            cell.clear();
        }
        for (pos, letter) in letters {
            self.cells[pos.row][pos.col].place(letter, placed_by, turn);
        }
        Ok(())
    }

    fn collect_snapshot_letters(
        &self,
        snapshot: &BoardSnapshot,
        empty: char,
    ) -> Result<Vec<(Position, char)>, BoardError> {
        let mut letters = Vec::new();
        match snapshot {
            BoardSnapshot::Rows(rows) => {
                for (row, line) in rows.iter().enumerate() {
                    let len = line.chars().count();
                    if row >= self.height {
                        if line.chars().all(|c| c == empty) {
                            continue;
                        }
                        return Err(BoardError::OutOfRange { row, col: 0 });
                    }
                    if len > self.width {
                        return Err(BoardError::RowTooLong {
                            row,
                            len,
                            width: self.width,
                        });
                    }
                    for (col, ch) in line.chars().enumerate() {
                        if ch == empty {
                            continue;
                        }
                        letters.push((Position::new(row, col), normalize_letter(row, col, ch)?));
                    }
                }
            }
            BoardSnapshot::Sparse(placed) => {
                for p in placed {
                    if !self.in_bounds(Position::new(p.row, p.col)) {
                        return Err(BoardError::OutOfRange {
                            row: p.row,
                            col: p.col,
                        });
                    }
                    letters.push((
                        Position::new(p.row, p.col),
                        normalize_letter(p.row, p.col, p.letter)?,
                    ));
                }
            }
        }
        Ok(letters)
    }

    /// One string per row, `empty` standing in for vacant squares
    pub fn export_snapshot(&self, empty: char) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.letter.unwrap_or(empty)).collect())
            .collect()
    }
}

fn normalize_letter(row: usize, col: usize, letter: char) -> Result<char, BoardError> {
    if !letter.is_alphabetic() {
        return Err(BoardError::InvalidLetter { row, col, letter });
    }
    Ok(letter.to_uppercase().next().unwrap_or(letter))
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
