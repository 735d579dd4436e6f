//! Player state and letter arithmetic.
//!
//! This module contains:
//! - `LetterCounts`, a multiset of letters used for rack checks
//! - `Rack`, the ordered tiles a player holds
//! - `Player` with rack, score history and the skip flag

use crate::board::PlayerId;
use crate::scoring::TurnScore;
use crate::tiles::TilePool;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A multiset of letters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterCounts {
    counts: BTreeMap<char, u32>,
}

impl LetterCounts {
    /// Create an empty multiset
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of letters
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Count of a specific letter
    pub fn get(&self, letter: char) -> u32 {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// Add `amount` copies of a letter
    pub fn add(&mut self, letter: char, amount: u32) {
        if amount > 0 {
            *self.counts.entry(letter).or_insert(0) += amount;
        }
    }

    /// Add every letter of another multiset
    pub fn add_counts(&mut self, other: &LetterCounts) {
        for (&letter, &count) in &other.counts {
            self.add(letter, count);
        }
    }

    /// Check if this multiset holds at least `needed`
    pub fn contains(&self, needed: &LetterCounts) -> bool {
        needed
            .counts
            .iter()
            .all(|(&letter, &count)| self.get(letter) >= count)
    }

    /// Subtract `needed` (panics if insufficient)
    pub fn subtract(&mut self, needed: &LetterCounts) {
        assert!(self.contains(needed), "Cannot remove letters not held");
        for (&letter, &count) in &needed.counts {
            let entry = self.counts.entry(letter).or_insert(0);
            *entry -= count;
            if *entry == 0 {
                self.counts.remove(&letter);
            }
        }
    }

    /// Try to subtract, returning false if insufficient
    pub fn try_subtract(&mut self, needed: &LetterCounts) -> bool {
        if !self.contains(needed) {
            return false;
        }
        self.subtract(needed);
        true
    }

    /// Iterate `(letter, count)` pairs in letter order
    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.counts.iter().map(|(&l, &c)| (l, c))
    }
}

impl FromIterator<char> for LetterCounts {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut counts = LetterCounts::new();
        for letter in iter {
            counts.add(letter, 1);
        }
        counts
    }
}

/// The tiles a player holds, in draw order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    tiles: Vec<char>,
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tiles(&self) -> &[char] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The rack as a multiset
    pub fn counts(&self) -> LetterCounts {
        self.tiles.iter().copied().collect()
    }

    /// Whether the rack holds every letter in `letters`, counting repeats
    pub fn has_letters(&self, letters: &[char]) -> bool {
        self.counts().contains(&letters.iter().copied().collect())
    }

    /// Remove one tile per letter. Leaves the rack unchanged and returns
    /// false if any letter is missing.
    pub fn remove_letters(&mut self, letters: &[char]) -> bool {
        if !self.has_letters(letters) {
            return false;
        }
        for letter in letters {
            if let Some(idx) = self.tiles.iter().position(|t| t == letter) {
                self.tiles.remove(idx);
            }
        }
        true
    }

    /// Put tiles onto the rack
    pub fn extend<I: IntoIterator<Item = char>>(&mut self, letters: I) {
        self.tiles.extend(letters);
    }

    /// Draw from the pool until the rack holds `rack_size` tiles or the pool
    /// runs dry. Returns the letters drawn.
    pub fn refill(&mut self, pool: &mut TilePool, rack_size: usize) -> Vec<char> {
        let drawn = pool.draw(rack_size.saturating_sub(self.tiles.len()));
        self.tiles.extend(drawn.iter().copied());
        drawn
    }
}

impl From<&str> for Rack {
    fn from(letters: &str) -> Self {
        Self {
            tiles: letters.chars().collect(),
        }
    }
}

impl std::fmt::Display for Rack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letters: Vec<String> = self.tiles.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", letters.join(" "))
    }
}

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player ID (position in turn order)
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Tiles in hand
    pub rack: Rack,
    /// One entry per scored action, in order
    pub score_history: Vec<TurnScore>,
    /// Always the sum of `score_history` totals
    pub current_score: u32,
    /// Set by a failed challenge; the next turn must be a skip
    pub skip_next_turn: bool,
}

impl Player {
    /// Create a new player with an empty rack
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            rack: Rack::new(),
            score_history: Vec::new(),
            current_score: 0,
            skip_next_turn: false,
        }
    }

    /// Case-insensitive name match
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Check the rack covers the newly played letters of a move.
    ///
    /// Returns `(has_letters, is_bingo)`. A bingo needs a full rack of
    /// `rack_size` tiles with all of them played.
    pub fn check_play(&self, new_letters: &[char], rack_size: usize) -> (bool, bool) {
        let has_letters = self.rack.has_letters(new_letters);
        let is_bingo =
            has_letters && self.rack.len() == rack_size && new_letters.len() == rack_size;
        (has_letters, is_bingo)
    }

    /// Append a score record. Returns its index in the history.
    pub fn add_score(&mut self, turn_score: TurnScore) -> usize {
        self.current_score += turn_score.total_score;
        self.score_history.push(turn_score);
        self.score_history.len() - 1
    }

    /// Zero a history entry in place, removing its points from the total.
    /// Returns the points removed.
    pub fn void_score(&mut self, index: usize) -> u32 {
        match self.score_history.get_mut(index) {
            Some(entry) => {
                let removed = entry.void();
                self.current_score -= removed;
                removed
            }
            None => 0,
        }
    }

    /// Recompute the total from the history
    pub fn history_total(&self) -> u32 {
        self.score_history.iter().map(|s| s.total_score).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::MoveKind;

    #[test]
    fn test_letter_counts_contains() {
        let rack: LetterCounts = "HELLOAB".chars().collect();
        assert!(rack.contains(&"HELLO".chars().collect()));
        assert!(!rack.contains(&"HELLLO".chars().collect()));
        assert!(!rack.contains(&"Z".chars().collect()));
    }

    #[test]
    fn test_letter_counts_subtract() {
        let mut counts: LetterCounts = "AABC".chars().collect();
        assert!(counts.try_subtract(&"AB".chars().collect()));
        assert_eq!(counts.get('A'), 1);
        assert_eq!(counts.get('B'), 0);
        assert_eq!(counts.total(), 2);
        assert!(!counts.try_subtract(&"BB".chars().collect()));
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_rack_remove_letters_all_or_nothing() {
        let mut rack = Rack::from("AEINRST");
        assert!(!rack.remove_letters(&['A', 'A']));
        assert_eq!(rack.len(), 7);

        assert!(rack.remove_letters(&['S', 'T', 'A']));
        assert_eq!(rack.tiles(), &['E', 'I', 'N', 'R']);
    }

    #[test]
    fn test_rack_refill() {
        let mut pool = TilePool::from_letters("ABCDEFGHIJ".chars().collect());
        let mut rack = Rack::from("XYZ");
        let drawn = rack.refill(&mut pool, 7);
        assert_eq!(drawn, vec!['A', 'B', 'C', 'D']);
        assert_eq!(rack.len(), 7);
        assert_eq!(pool.len(), 6);

        // Already full, nothing drawn
        assert!(rack.refill(&mut pool, 7).is_empty());
    }

    #[test]
    fn test_rack_refill_from_short_pool() {
        let mut pool = TilePool::from_letters(vec!['Q']);
        let mut rack = Rack::new();
        assert_eq!(rack.refill(&mut pool, 7), vec!['Q']);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_check_play_bingo() {
        let mut player = Player::new(0, "Ann".to_string());
        player.rack = Rack::from("RETAINS");
        let played: Vec<char> = "RETAINS".chars().collect();
        assert_eq!(player.check_play(&played, 7), (true, true));

        // Repeated letters still count as distinct tiles
        player.rack = Rack::from("AABBCCD");
        let played: Vec<char> = "ABACBCD".chars().collect();
        assert_eq!(player.check_play(&played, 7), (true, true));

        // Not every tile used
        assert_eq!(player.check_play(&played[..6], 7), (true, false));
    }

    #[test]
    fn test_check_play_missing_letters() {
        let mut player = Player::new(0, "Ann".to_string());
        player.rack = Rack::from("HELOAAB");
        let played: Vec<char> = "HELLO".chars().collect();
        assert_eq!(player.check_play(&played, 7), (false, false));
    }

    #[test]
    fn test_add_and_void_score() {
        let mut player = Player::new(1, "Bob".to_string());
        let mut first = TurnScore::new(MoveKind::Play, 0);
        first.total_score = 12;
        let mut second = TurnScore::new(MoveKind::Play, 1);
        second.total_score = 30;

        player.add_score(first);
        let idx = player.add_score(second);
        assert_eq!(player.current_score, 42);

        assert_eq!(player.void_score(idx), 30);
        assert_eq!(player.current_score, 12);
        assert_eq!(player.score_history.len(), 2);
        assert!(player.score_history[1].voided);
        assert_eq!(player.current_score, player.history_total());
    }

    #[test]
    fn test_is_named() {
        let player = Player::new(0, "Nick".to_string());
        assert!(player.is_named("nick"));
        assert!(player.is_named(" NICK "));
        assert!(!player.is_named("bob"));
    }
}
