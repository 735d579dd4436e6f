//! Scoring engine.
//!
//! Letter bonuses apply to individual letters before the word is summed.
//! Word bonuses are collected in the order the word crosses them and then
//! multiply the summed total, so two double-word squares give x4. Only squares
//! filled this turn carry their bonus; letters already on the board score
//! their face value.

use crate::actions::MoveKind;
use crate::board::{Board, Bonus, PlayerId};
use crate::config::GameConfig;
use crate::coord::Position;
use crate::word::{PlayedWord, PositionKey, Word};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Bonuses available this turn, keyed by square
pub type BonusMap = HashMap<Position, Bonus>;

/// Bonuses printed under the squares filled by `played`
pub fn turn_bonuses(board: &Board, played: &PlayedWord) -> BonusMap {
    played
        .new_tiles()
        .map(|(pos, _)| (pos, board.get_bonus(pos)))
        .filter(|(_, bonus)| *bonus != Bonus::None)
        .collect()
}

/// A word with its per-letter and total score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredWord {
    pub word: Word,
    pub tile_scores_no_bonus: Vec<u32>,
    pub tile_scores_with_bonus: Vec<u32>,
    /// Word multipliers in the order encountered
    pub word_multipliers: Vec<u32>,
    pub total_score: u32,
}

impl ScoredWord {
    /// Score a word against this turn's bonuses
    pub fn new(word: Word, bonuses: &BonusMap, config: &GameConfig) -> Self {
        let tile_scores_no_bonus: Vec<u32> =
            word.letters.chars().map(|l| config.letter_value(l)).collect();
        let mut tile_scores_with_bonus = tile_scores_no_bonus.clone();
        let mut word_multipliers = Vec::new();

        for (i, (pos, _)) in word.positions().enumerate() {
            let bonus = bonuses.get(&pos).copied().unwrap_or_default();
            tile_scores_with_bonus[i] *= bonus.letter_multiplier();
            if let Some(multiplier) = bonus.word_multiplier() {
                word_multipliers.push(multiplier);
            }
        }

        let total_score = word_multipliers
            .iter()
            .fold(tile_scores_with_bonus.iter().sum::<u32>(), |score, m| score * m);

        Self {
            word,
            tile_scores_no_bonus,
            tile_scores_with_bonus,
            word_multipliers,
            total_score,
        }
    }

    /// Human-readable per-letter breakdown
    pub fn breakdown(&self) -> String {
        let row = |values: &[u32]| -> String {
            values
                .iter()
                .map(|v| format!("{:>3}", v))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let letters: Vec<String> = self.word.letters.chars().map(|l| format!("{:>3}", l)).collect();

        let mut out = format!(
            "Played '{}' starting at {} going {}\n",
            self.word.letters,
            self.word.start.label(),
            if self.word.direction.is_horizontal() {
                "right"
            } else {
                "down"
            }
        );
        out.push_str(&format!("{:<25}: {}\n", "Letters", letters.join(" ")));
        out.push_str(&format!(
            "{:<25}: {}\n",
            "Letter Score No Bonus",
            row(&self.tile_scores_no_bonus)
        ));
        out.push_str(&format!(
            "{:<25}: {}\n",
            "Letter Score With Bonus",
            row(&self.tile_scores_with_bonus)
        ));
        out.push_str(&format!(
            "Letter with bonus sum: {}\n",
            self.tile_scores_with_bonus.iter().sum::<u32>()
        ));
        if !self.word_multipliers.is_empty() {
            let mults: Vec<String> = self.word_multipliers.iter().map(|m| format!("* {}", m)).collect();
            out.push_str(&format!("Multipliers: {}\n", mults.join(" ")));
        }
        out.push_str(&format!("Total Word Score: {}\n", self.total_score));
        out
    }
}

/// Who challenged whom, and how it went
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub challenger: PlayerId,
    pub challenged: PlayerId,
    /// Turn of the challenged play
    pub challenged_turn: u32,
    pub successful: bool,
    /// Points the challenged play lost
    pub voided_score: u32,
}

/// Scoring outcome of one move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnScore {
    pub kind: MoveKind,
    pub turn: u32,
    pub scored_words: BTreeMap<PositionKey, ScoredWord>,
    pub is_bingo: bool,
    pub total_score: u32,
    pub challenge: Option<ChallengeRecord>,
    /// Set when a successful challenge zeroed this entry
    pub voided: bool,
}

impl TurnScore {
    pub fn new(kind: MoveKind, turn: u32) -> Self {
        Self {
            kind,
            turn,
            scored_words: BTreeMap::new(),
            is_bingo: false,
            total_score: 0,
            challenge: None,
            voided: false,
        }
    }

    /// Score for a challenge, worth `points` to the challenger
    pub fn for_challenge(turn: u32, record: ChallengeRecord, points: u32) -> Self {
        Self {
            total_score: points,
            challenge: Some(record),
            ..Self::new(MoveKind::Challenge, turn)
        }
    }

    /// Add a word; a word already recorded at the same key is replaced
    pub fn add_word(&mut self, key: PositionKey, word: ScoredWord) {
        if let Some(previous) = self.scored_words.insert(key, word) {
            self.total_score -= previous.total_score;
        }
        self.total_score += self.scored_words[&key].total_score;
    }

    pub fn apply_bingo_bonus(&mut self, is_bingo: bool, bonus: u32) {
        if is_bingo && !self.is_bingo {
            self.total_score += bonus;
        }
        self.is_bingo = is_bingo;
    }

    /// Zero this entry in place, returning the points it held
    pub fn void(&mut self) -> u32 {
        let removed = self.total_score;
        self.total_score = 0;
        self.is_bingo = false;
        self.scored_words.clear();
        self.voided = true;
        removed
    }

    /// Every word this turn formed
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.scored_words.values().map(|w| w.word.letters.as_str())
    }

    /// Summary block for `player_name`
    pub fn summary(&self, player_name: &str) -> String {
        let mut out = format!("{} had the following word scores:\n", player_name);
        for word in self.scored_words.values() {
            out.push_str(&word.breakdown());
        }
        if self.is_bingo {
            out.push_str("+ Bingo Bonus\n");
        }
        out.push_str(&format!("Total Turn Score: {}\n", self.total_score));
        out
    }
}
