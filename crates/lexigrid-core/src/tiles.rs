//! The shared bag of undrawn tiles.

use crate::config::GameConfig;
use crate::player::LetterCounts;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Letters not yet dealt to any player, drawn from the front
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePool {
    letters: Vec<char>,
}

impl TilePool {
    /// Fill the pool from the config distribution and shuffle it
    pub fn from_config<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let mut letters = Vec::with_capacity(config.total_tiles() as usize);
        for (&letter, &count) in &config.tile_distribution {
            letters.extend(std::iter::repeat(letter).take(count as usize));
        }
        letters.shuffle(rng);
        Self { letters }
    }

    /// A pool that deals exactly `letters`, in order
    pub fn from_letters(letters: Vec<char>) -> Self {
        Self { letters }
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Take up to `count` letters; fewer if the pool runs out
    pub fn draw(&mut self, count: usize) -> Vec<char> {
        let take = count.min(self.letters.len());
        self.letters.drain(..take).collect()
    }

    /// Put exchanged letters back and reshuffle
    pub fn return_letters<R: Rng>(&mut self, letters: &[char], rng: &mut R) {
        self.letters.extend_from_slice(letters);
        self.letters.shuffle(rng);
    }

    /// Multiset of the remaining letters
    pub fn counts(&self) -> LetterCounts {
        self.letters.iter().copied().collect()
    }
}
