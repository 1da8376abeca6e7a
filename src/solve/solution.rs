//! Solution representation for Letterboxed puzzles

use crate::letterbox::Word;
use crate::search::Path;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// A word chain that covers every letter on the square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Words in play order
    pub words: Vec<Word>,
    /// Time from the start of the search until this solution was reported
    #[serde(skip)]
    pub solve_time: Duration,
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Identifier derived from the words, stable across runs
    pub id: String,
    pub word_count: usize,
    /// Total letters typed, counting repeats
    pub character_count: usize,
    pub distinct_letters: usize,
    /// Letters typed more than once across the chain
    pub reused_letters: usize,
}

impl Solution {
    pub fn new(path: Path, solve_time: Duration) -> Self {
        let metadata = SolutionMetadata::analyze(&path);
        Self {
            words: path.words,
            solve_time,
            metadata,
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Words joined with arrows, as printed on the console
    pub fn chain(&self) -> String {
        self.words
            .iter()
            .map(Word::as_str)
            .collect::<Vec<_>>()
            .join(" → ")
    }

    pub fn letters(&self) -> BTreeSet<char> {
        self.words.iter().flat_map(|w| w.chars()).collect()
    }

    /// Check if this solution uses the same words in the same order as another
    pub fn is_equivalent_to(&self, other: &Solution) -> bool {
        self.words == other.words
    }

    /// Get a summary of the solution
    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            id: self.metadata.id.clone(),
            chain: self.chain(),
            word_count: self.metadata.word_count,
            character_count: self.metadata.character_count,
            solve_time_ms: self.solve_time.as_millis() as u64,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl SolutionMetadata {
    /// Analyze a path and create metadata
    pub fn analyze(path: &Path) -> Self {
        let character_count: usize = path.words.iter().map(|w| w.letter_len()).sum();
        let distinct_letters = path.letters().len();

        Self {
            id: Self::generate_id(path),
            word_count: path.len(),
            character_count,
            distinct_letters,
            reused_letters: character_count - distinct_letters,
        }
    }

    // FNV-1a over the chain text, so ids do not change between builds
    fn generate_id(path: &Path) -> String {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in path.to_string().bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        format!("sol_{:016x}", hash)
    }
}

/// Summary of a solution for display purposes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub id: String,
    pub chain: String,
    pub word_count: usize,
    pub character_count: usize,
    pub solve_time_ms: u64,
}

impl std::fmt::Display for SolutionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solution {}: {} ({} words, {} letters, {}ms)",
               self.id,
               self.chain,
               self.word_count,
               self.character_count,
               self.solve_time_ms)
    }
}
