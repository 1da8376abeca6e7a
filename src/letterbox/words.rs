//! Word filtering against the rules of a Letterboxed square

use super::LetterSideMap;
use crate::error::{PuzzleError, Result};
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// Default minimum word length; one- and two-letter words are never playable
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// A normalized, non-empty word.
///
/// Ordering and equality follow the text, so collections of words sort
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    text: String,
    first: char,
    last: char,
}

impl Word {
    /// Wrap already-normalized text; `None` if it is empty
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let first = text.chars().next()?;
        let last = text.chars().next_back()?;
        Some(Self { text, first, last })
    }

    #[inline]
    pub fn first(&self) -> char {
        self.first
    }

    #[inline]
    pub fn last(&self) -> char {
        self.last
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in letters
    pub fn letter_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Distinct letters of the word
    pub fn letters(&self) -> BTreeSet<char> {
        self.text.chars().collect()
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for Word {
    type Error = String;

    fn try_from(text: String) -> std::result::Result<Self, Self::Error> {
        Word::new(text).ok_or_else(|| "word cannot be empty".to_string())
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.text
    }
}

/// Why a candidate word is not playable on the square
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("letter '{0}' is not on the square")]
    UnknownLetter(char),

    #[error("length {length} is below the minimum of {min_length}")]
    TooShort { length: usize, min_length: usize },

    #[error("'{first}' and '{second}' are both on side {side}")]
    SameSideRun { first: char, second: char, side: usize },
}

/// Filters a raw vocabulary down to the words playable on one square.
#[derive(Debug, Clone)]
pub struct WordValidator<'a> {
    side_map: &'a LetterSideMap,
    min_length: usize,
}

impl<'a> WordValidator<'a> {
    pub fn new(side_map: &'a LetterSideMap, min_length: usize) -> Result<Self> {
        if min_length < 1 {
            return Err(PuzzleError::InvalidParameter(
                "min_length must be at least 1".to_string(),
            ));
        }
        Ok(Self { side_map, min_length })
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Normalize a single candidate and check it against the three rules,
    /// in order: letters on the square, minimum length, no same-side run.
    pub fn check(&self, candidate: &str) -> std::result::Result<Word, Rejection> {
        let normalized = candidate.trim().to_lowercase();

        let mut sides = Vec::with_capacity(normalized.len());
        for letter in normalized.chars() {
            match self.side_map.side_of(letter) {
                Some(side) => sides.push((letter, side)),
                None => return Err(Rejection::UnknownLetter(letter)),
            }
        }

        if sides.len() < self.min_length {
            return Err(Rejection::TooShort {
                length: sides.len(),
                min_length: self.min_length,
            });
        }

        if let Some(((first, side), (second, _))) = sides
            .iter()
            .copied()
            .tuple_windows()
            .find(|((_, a), (_, b))| a == b)
        {
            return Err(Rejection::SameSideRun { first, second, side });
        }

        Word::new(normalized).ok_or(Rejection::TooShort {
            length: 0,
            min_length: self.min_length,
        })
    }

    pub fn is_valid(&self, candidate: &str) -> bool {
        self.check(candidate).is_ok()
    }

    /// Filter a vocabulary into the set of playable words.
    ///
    /// Candidates are checked in parallel and merged into an ordered set,
    /// so duplicates collapse and the result does not depend on scheduling.
    pub fn validate<S>(&self, vocabulary: &[S]) -> BTreeSet<Word>
    where
        S: AsRef<str> + Sync,
    {
        vocabulary
            .par_iter()
            .filter_map(|candidate| self.check(candidate.as_ref()).ok())
            .collect()
    }
}
