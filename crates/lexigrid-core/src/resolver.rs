//! Reconciles a proposed placement with the board.
//!
//! A move may straddle letters that are already down: playing `AMENDMENT`
//! through an existing `MEND` only takes `A`, `M`, `E`, `N`, `T` from the
//! rack, and only those squares can trigger bonuses.

use crate::board::Board;
use crate::coord::{Direction, Position};
use crate::error::MoveError;
use crate::word::{PlayedWord, PositionKey, Word};
use std::collections::BTreeMap;

/// Classify each square of `word` as new or pre-existing.
///
/// Fails with `OutOfBounds` if the word runs off the board and with
/// `LetterConflict` if an occupied square holds a different letter.
pub fn classify_tiles(word: Word, board: &Board) -> Result<PlayedWord, MoveError> {
    if !word.is_fully_on_board(board.height(), board.width()) {
        return Err(MoveError::OutOfBounds);
    }

    let mut is_played_tile = Vec::with_capacity(word.len());
    for (pos, letter) in word.positions() {
        match board.get_letter(pos) {
            None => is_played_tile.push(true),
            Some(existing) if existing == letter => is_played_tile.push(false),
            Some(existing) => {
                return Err(MoveError::LetterConflict {
                    row: pos.row,
                    col: pos.col,
                    expected: letter,
                    found: existing,
                })
            }
        }
    }

    Ok(PlayedWord::new(word, is_played_tile))
}

/// Whether the play touches what is already on the board.
///
/// Straddling an existing letter counts, as does any new letter orthogonally
/// adjacent to an occupied square.
pub fn is_connected(board: &Board, played: &PlayedWord) -> bool {
    played.uses_existing_tile()
        || played
            .new_tiles()
            .any(|(pos, _)| board.has_occupied_neighbour(pos))
}

/// The full contiguous run of letters through `pos` along `direction`.
///
/// Returns None when the run is a single letter or the square is empty.
pub fn find_word_through_cell(board: &Board, pos: Position, direction: Direction) -> Option<Word> {
    if !board.is_occupied(pos) {
        return None;
    }

    let mut start = pos;
    while let Some(prev) = start.step_back(direction) {
        if !board.is_occupied(prev) {
            break;
        }
        start = prev;
    }

    let mut letters = String::new();
    let mut cursor = start;
    while let Some(letter) = board.get_letter(cursor) {
        letters.push(letter);
        cursor = cursor.advance(direction, 1);
    }

    if letters.chars().count() > 1 {
        Some(Word {
            letters,
            start,
            direction,
        })
    } else {
        None
    }
}

/// Every word created or extended by `played`, keyed by position.
///
/// Must run after the new letters are on the board. The main-axis word is
/// included only when the move placed at least one letter; each new letter
/// contributes its perpendicular word.
pub fn formed_words(board: &Board, played: &PlayedWord) -> BTreeMap<PositionKey, Word> {
    let mut words = BTreeMap::new();
    let width = board.width();
    let direction = played.word().direction;

    if played.new_tiles().next().is_none() {
        return words;
    }

    if let Some(main) = find_word_through_cell(board, played.word().start, direction) {
        words.insert(main.position_key(width), main);
    }
    for (pos, _) in played.new_tiles() {
        if let Some(cross) = find_word_through_cell(board, pos, direction.cross()) {
            words.entry(cross.position_key(width)).or_insert(cross);
        }
    }
    words
}
