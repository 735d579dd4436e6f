//! Word validity lookup used to settle challenges.

use std::collections::HashSet;

/// Anything that can say whether a string is a legal word
pub trait Dictionary {
    fn check_word(&self, word: &str) -> bool;
}

impl<D: Dictionary + ?Sized> Dictionary for Box<D> {
    fn check_word(&self, word: &str) -> bool {
        (**self).check_word(word)
    }
}

/// A fixed set of upper-case words
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any list of words; case is ignored
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// One word per line. Blank lines and lines containing anything other
    /// than letters are skipped.
    pub fn parse(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && line.chars().all(char::is_alphabetic)),
        )
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }
}

impl Dictionary for WordList {
    fn check_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

/// Accepts every word, so challenges always fail
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Dictionary for AcceptAll {
    fn check_word(&self, _word: &str) -> bool {
        true
    }
}
