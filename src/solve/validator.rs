//! Independent validation of word chains against a puzzle

use crate::letterbox::{LetterSideMap, Rejection, WordValidator};
use crate::error::Result;
use itertools::Itertools;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Checks a chain of words against every rule of the puzzle, without
/// relying on the transition graph that produced it.
pub struct ChainValidator<'a> {
    side_map: &'a LetterSideMap,
    words: WordValidator<'a>,
    vocabulary: Option<HashSet<String>>,
}

/// Result of chain validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub word_violations: Vec<WordViolation>,
    pub chain_breaks: Vec<ChainBreak>,
    pub repeated_words: Vec<String>,
    pub unknown_words: Vec<String>,
    pub missing_letters: BTreeSet<char>,
    pub error_message: Option<String>,
}

/// A word in the chain that is not playable on the square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordViolation {
    pub position: usize,
    pub word: String,
    pub reason: Rejection,
}

/// Two consecutive words that do not link last letter to first letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBreak {
    pub position: usize,
    pub previous: String,
    pub next: String,
}

impl<'a> ChainValidator<'a> {
    pub fn new(side_map: &'a LetterSideMap, min_length: usize) -> Result<Self> {
        Ok(Self {
            side_map,
            words: WordValidator::new(side_map, min_length)?,
            vocabulary: None,
        })
    }

    /// Also require every word to appear in this (already normalized) vocabulary
    pub fn with_vocabulary<I, S>(mut self, vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.vocabulary = Some(
            vocabulary
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .collect(),
        );
        self
    }

    /// Validate a chain, collecting every problem rather than stopping at the first
    pub fn validate<S: AsRef<str>>(&self, chain: &[S]) -> ValidationResult {
        let normalized: Vec<String> = chain
            .iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .collect();

        let word_violations: Vec<WordViolation> = normalized
            .iter()
            .enumerate()
            .filter_map(|(position, word)| {
                self.words.check(word).err().map(|reason| WordViolation {
                    position,
                    word: word.clone(),
                    reason,
                })
            })
            .collect();

        let chain_breaks: Vec<ChainBreak> = normalized
            .iter()
            .enumerate()
            .tuple_windows()
            .filter(|((_, previous), (_, next))| previous.chars().last() != next.chars().next())
            .map(|((_, previous), (position, next))| ChainBreak {
                position,
                previous: previous.clone(),
                next: next.clone(),
            })
            .collect();

        let repeated_words: Vec<String> = normalized
            .iter()
            .duplicates()
            .cloned()
            .collect();

        let unknown_words: Vec<String> = match &self.vocabulary {
            Some(vocabulary) => normalized
                .iter()
                .filter(|w| !vocabulary.contains(w.as_str()))
                .unique()
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        let used: BTreeSet<char> = normalized.iter().flat_map(|w| w.chars()).collect();
        let missing_letters: BTreeSet<char> =
            self.side_map.letters().difference(&used).copied().collect();

        let is_valid = !normalized.is_empty()
            && word_violations.is_empty()
            && chain_breaks.is_empty()
            && repeated_words.is_empty()
            && unknown_words.is_empty()
            && missing_letters.is_empty();

        let mut result = ValidationResult {
            is_valid,
            word_violations,
            chain_breaks,
            repeated_words,
            unknown_words,
            missing_letters,
            error_message: None,
        };

        if !is_valid {
            result.error_message = Some(Self::generate_error_message(&result, normalized.is_empty()));
        }

        result
    }

    /// Generate a descriptive error message from validation details
    fn generate_error_message(result: &ValidationResult, empty: bool) -> String {
        let mut problems = Vec::new();

        if empty {
            problems.push("chain is empty".to_string());
        }
        for violation in &result.word_violations {
            problems.push(format!(
                "word {} '{}': {}",
                violation.position + 1,
                violation.word,
                violation.reason
            ));
        }
        for chain_break in &result.chain_breaks {
            problems.push(format!(
                "'{}' does not start with the last letter of '{}'",
                chain_break.next, chain_break.previous
            ));
        }
        if !result.repeated_words.is_empty() {
            problems.push(format!("repeated words: {}", result.repeated_words.join(", ")));
        }
        if !result.unknown_words.is_empty() {
            problems.push(format!("not in word list: {}", result.unknown_words.join(", ")));
        }
        if !result.missing_letters.is_empty() {
            problems.push(format!(
                "letters never used: {}",
                result.missing_letters.iter().collect::<String>()
            ));
        }

        problems.join("; ")
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        writeln!(f, "  Word violations: {}", self.word_violations.len())?;
        writeln!(f, "  Chain breaks: {}", self.chain_breaks.len())?;
        writeln!(f, "  Repeated words: {}", self.repeated_words.len())?;
        writeln!(f, "  Unknown words: {}", self.unknown_words.len())?;
        write!(
            f,
            "  Missing letters: {}",
            if self.missing_letters.is_empty() {
                "none".to_string()
            } else {
                self.missing_letters.iter().collect::<String>()
            }
        )
    }
}
