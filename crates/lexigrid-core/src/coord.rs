//! Grid coordinate system.
//!
//! This module provides the foundational coordinate types for the square board:
//! - `Position`: Identifies a single cell by row and column
//! - `Direction`: The axis a word is laid along
//!
//! Rows grow downward and columns grow to the right, both starting at zero.

use serde::{Deserialize, Serialize};

/// Axis along which a word is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right along a row
    Horizontal,
    /// Top to bottom along a column
    Vertical,
}

impl Direction {
    /// The perpendicular axis
    pub fn cross(&self) -> Direction {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Horizontal)
    }
}

/// A cell coordinate on the board
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position `offset` cells further along `direction`
    pub fn advance(&self, direction: Direction, offset: usize) -> Position {
        match direction {
            Direction::Horizontal => Position::new(self.row, self.col + offset),
            Direction::Vertical => Position::new(self.row + offset, self.col),
        }
    }

    /// The previous cell along `direction`, or None at the top/left edge
    pub fn step_back(&self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Horizontal => self.col.checked_sub(1).map(|c| Position::new(self.row, c)),
            Direction::Vertical => self.row.checked_sub(1).map(|r| Position::new(r, self.col)),
        }
    }

    /// Orthogonal neighbours that fall inside a `height` x `width` grid
    pub fn neighbours(&self, height: usize, width: usize) -> Vec<Position> {
        let mut out = Vec::with_capacity(4);
        if self.row > 0 {
            out.push(Position::new(self.row - 1, self.col));
        }
        if self.row + 1 < height {
            out.push(Position::new(self.row + 1, self.col));
        }
        if self.col > 0 {
            out.push(Position::new(self.row, self.col - 1));
        }
        if self.col + 1 < width {
            out.push(Position::new(self.row, self.col + 1));
        }
        out
    }

    /// Board label in the `H8` style: column letter then 1-based row
    pub fn label(&self) -> String {
        let col = (b'A' + (self.col % 26) as u8) as char;
        format!("{}{}", col, self.row + 1)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}
