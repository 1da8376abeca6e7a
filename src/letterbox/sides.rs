//! Letter-to-side assignment for a Letterboxed square

use crate::error::{PuzzleError, Result};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Minimum number of sides a square must have
pub const MIN_SIDES: usize = 2;

/// Maps every letter on the square to the index of the side holding it.
///
/// Built once from the side definitions and immutable afterwards. Each
/// letter belongs to exactly one side; a letter listed on two sides is
/// rejected rather than resolved in favour of either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterSideMap {
    sides: Vec<BTreeSet<char>>,
    lookup: HashMap<char, usize>,
}

impl LetterSideMap {
    /// Build the map from an ordered sequence of side strings.
    ///
    /// Side letters are trimmed and lowercased. Repeating a letter within
    /// one side is harmless, since a side is a set.
    pub fn new<S: AsRef<str>>(sides: &[S]) -> Result<Self> {
        if sides.len() < MIN_SIDES {
            return Err(PuzzleError::Configuration(format!(
                "at least {} sides are required, got {}",
                MIN_SIDES,
                sides.len()
            )));
        }

        let mut letter_sets = Vec::with_capacity(sides.len());
        let mut lookup = HashMap::new();

        for (index, side) in sides.iter().enumerate() {
            let normalized = side.as_ref().trim().to_lowercase();
            if normalized.is_empty() {
                return Err(PuzzleError::Configuration(format!("side {} is empty", index)));
            }

            let mut letters = BTreeSet::new();
            for letter in normalized.chars() {
                if !letter.is_alphabetic() {
                    return Err(PuzzleError::Configuration(format!(
                        "side {} contains non-letter character '{}'",
                        index, letter
                    )));
                }

                match lookup.get(&letter) {
                    Some(&owner) if owner != index => {
                        return Err(PuzzleError::Configuration(format!(
                            "letter '{}' appears on both side {} and side {}",
                            letter, owner, index
                        )));
                    }
                    Some(_) => {}
                    None => {
                        lookup.insert(letter, index);
                    }
                }
                letters.insert(letter);
            }
            letter_sets.push(letters);
        }

        Ok(Self {
            sides: letter_sets,
            lookup,
        })
    }

    /// Side index of a letter, or `None` if the letter is not on the square
    #[inline]
    pub fn side_of(&self, letter: char) -> Option<usize> {
        self.lookup.get(&letter).copied()
    }

    #[inline]
    pub fn contains(&self, letter: char) -> bool {
        self.lookup.contains_key(&letter)
    }

    pub fn side_count(&self) -> usize {
        self.sides.len()
    }

    /// Letters of each side, in side order
    pub fn sides(&self) -> &[BTreeSet<char>] {
        &self.sides
    }

    /// Every letter on the square; this is the default cover target
    pub fn letters(&self) -> BTreeSet<char> {
        self.lookup.keys().copied().collect()
    }

    pub fn letter_count(&self) -> usize {
        self.lookup.len()
    }
}

impl fmt::Display for LetterSideMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .sides
            .iter()
            .map(|side| side.iter().collect::<String>())
            .collect();
        write!(f, "{}", rendered.join(" | "))
    }
}
