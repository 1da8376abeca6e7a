//! Letterboxed problem definition

use crate::config::Settings;
use crate::letterbox::{load_vocabulary, LetterSideMap, WordValidator};
use crate::search::{CoverSearch, SearchLimits, TransitionGraph};
use super::{ChainValidator, Solution, ValidationResult};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Instant;
use tracing::{info, warn};

/// One puzzle instance: the square, its playable words and their
/// transition graph, built once and reused for every search.
pub struct LetterboxProblem {
    settings: Settings,
    side_map: LetterSideMap,
    graph: TransitionGraph,
    vocabulary_size: usize,
}

impl LetterboxProblem {
    /// Create a new problem from settings, reading the configured word list
    pub fn new(settings: Settings) -> Result<Self> {
        // Fail on bad sides or parameters before reading the word list
        settings.validate()?;

        let vocabulary = load_vocabulary(&settings.input.wordlist_file)
            .context("Failed to load word list")?;

        Self::with_vocabulary(settings, &vocabulary)
    }

    /// Create a problem with an in-memory vocabulary (useful for testing)
    pub fn with_vocabulary<S>(settings: Settings, vocabulary: &[S]) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        let side_map = settings.side_map()?;
        let validator = WordValidator::new(&side_map, settings.search.min_word_length)?;
        settings.search_limits()?;

        let start_time = Instant::now();
        let valid_words = validator.validate(vocabulary);
        info!(
            candidates = vocabulary.len(),
            valid = valid_words.len(),
            "filtered vocabulary"
        );

        let graph = TransitionGraph::build(&valid_words);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "built transition graph"
        );

        Ok(Self {
            settings,
            side_map,
            graph,
            vocabulary_size: vocabulary.len(),
        })
    }

    /// Solve with the configured limits
    pub fn solve(&self) -> Result<Vec<Solution>> {
        let limits = self.settings.search_limits()?;
        self.solve_with(limits)
    }

    /// Solve with other limits, reusing the already built graph
    pub fn solve_with(&self, limits: SearchLimits) -> Result<Vec<Solution>> {
        let start_time = Instant::now();
        let target = self.side_map.letters();

        let paths = CoverSearch::new(&self.graph, &target, limits)?.run();
        let solve_time = start_time.elapsed();

        info!(
            found = paths.len(),
            max_length = limits.max_length(),
            solution_limit = limits.solution_limit(),
            elapsed_ms = solve_time.as_millis() as u64,
            "cover search complete"
        );

        let validator = ChainValidator::new(&self.side_map, self.settings.search.min_word_length)?;
        let mut solutions = Vec::with_capacity(paths.len());
        for path in paths {
            let result = validator.validate(&path.words);
            if result.is_valid {
                solutions.push(Solution::new(path, solve_time));
            } else {
                warn!(
                    chain = %path,
                    error = result.error_message.as_deref().unwrap_or("unknown error"),
                    "search produced an invalid chain"
                );
            }
        }

        Ok(solutions)
    }

    /// Validate an arbitrary chain against this puzzle and its vocabulary
    pub fn check_chain<S: AsRef<str>>(&self, chain: &[S]) -> Result<ValidationResult> {
        let validator = ChainValidator::new(&self.side_map, self.settings.search.min_word_length)?
            .with_vocabulary(self.graph.words().iter().map(|w| w.as_str()));
        Ok(validator.validate(chain))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn side_map(&self) -> &LetterSideMap {
        &self.side_map
    }

    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    /// Vocabulary and graph statistics
    pub fn statistics(&self) -> PuzzleStatistics {
        let covered: BTreeSet<char> = self
            .graph
            .words()
            .iter()
            .flat_map(|w| w.chars())
            .collect();
        let uncoverable_letters = self.side_map.letters().difference(&covered).copied().collect();

        let node_count = self.graph.node_count();
        let edge_count = self.graph.edge_count();

        PuzzleStatistics {
            vocabulary_size: self.vocabulary_size,
            valid_words: node_count,
            edge_count,
            average_out_degree: if node_count == 0 {
                0.0
            } else {
                edge_count as f64 / node_count as f64
            },
            dead_end_words: self.graph.dead_ends().count(),
            uncoverable_letters,
        }
    }
}

/// Vocabulary and graph statistics for one puzzle
#[derive(Debug, Clone)]
pub struct PuzzleStatistics {
    pub vocabulary_size: usize,
    pub valid_words: usize,
    pub edge_count: usize,
    pub average_out_degree: f64,
    pub dead_end_words: usize,
    /// Square letters no playable word contains; any of these makes the puzzle unsolvable
    pub uncoverable_letters: BTreeSet<char>,
}

impl PuzzleStatistics {
    pub fn is_solvable_in_principle(&self) -> bool {
        self.uncoverable_letters.is_empty() && self.valid_words > 0
    }
}

impl fmt::Display for PuzzleStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Puzzle Statistics:")?;
        writeln!(f, "  Vocabulary size: {}", self.vocabulary_size)?;
        writeln!(f, "  Playable words: {}", self.valid_words)?;
        writeln!(f, "  Transitions: {}", self.edge_count)?;
        writeln!(f, "  Average successors per word: {:.2}", self.average_out_degree)?;
        writeln!(f, "  Dead-end words: {}", self.dead_end_words)?;
        if self.uncoverable_letters.is_empty() {
            write!(f, "  Every letter appears in some playable word")
        } else {
            write!(
                f,
                "  Letters no playable word uses: {}",
                self.uncoverable_letters.iter().collect::<String>()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use tempfile::tempdir;

    const VOCABULARY: &[&str] = &[
        "amity", "azo", "benzol", "botany", "enzyme", "limbo", "limbos", "meat", "oasis",
        "obey", "satiny", "sent", "table", "tiny", "yeti", "zany", "zoea", "MOST", "yearn",
        "Tiny", "ab",
    ];

    fn create_test_settings(max_length: usize, limit: usize) -> Settings {
        let mut settings = Settings::default();
        settings.search.max_chain_length = max_length;
        settings.search.solution_limit = limit;
        settings
    }

    #[test]
    fn test_problem_creation_with_vocabulary() {
        let problem = LetterboxProblem::with_vocabulary(create_test_settings(6, 3), VOCABULARY).unwrap();

        let stats = problem.statistics();
        assert_eq!(stats.vocabulary_size, 21);
        assert_eq!(stats.valid_words, 17);
        assert!(stats.is_solvable_in_principle());
    }

    #[test]
    fn test_solve() {
        let problem = LetterboxProblem::with_vocabulary(create_test_settings(6, 3), VOCABULARY).unwrap();

        let chains: Vec<String> = problem.solve().unwrap().iter().map(Solution::chain).collect();
        assert_eq!(
            chains,
            vec![
                "benzol → limbos → satiny",
                "benzol → limbo → oasis → satiny",
                "limbos → sent → table → enzyme",
            ]
        );
    }

    #[test]
    fn test_solve_with_reuses_graph() {
        let problem = LetterboxProblem::with_vocabulary(create_test_settings(6, 3), VOCABULARY).unwrap();

        assert!(problem.solve_with(SearchLimits::new(2, 3).unwrap()).unwrap().is_empty());
        let one = problem.solve_with(SearchLimits::new(6, 1).unwrap()).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].chain(), "benzol → limbos → satiny");
    }

    #[test]
    fn test_unsolvable_vocabulary() {
        let problem =
            LetterboxProblem::with_vocabulary(create_test_settings(6, 3), &["tiny", "yeti"]).unwrap();

        let stats = problem.statistics();
        assert!(!stats.is_solvable_in_principle());
        assert!(stats.uncoverable_letters.contains(&'z'));
        assert!(problem.solve().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_parameters_fail_construction() {
        let err = LetterboxProblem::with_vocabulary(create_test_settings(0, 3), VOCABULARY)
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<PuzzleError>(),
            Some(PuzzleError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_check_chain_uses_vocabulary() {
        let problem = LetterboxProblem::with_vocabulary(create_test_settings(6, 3), VOCABULARY).unwrap();

        assert!(problem.check_chain(&["benzol", "limbos", "satiny"]).unwrap().is_valid);

        let result = problem.check_chain(&["benzol", "lobs", "satiny"]).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.unknown_words, vec!["lobs"]);
    }

    #[test]
    fn test_new_reads_word_list() {
        let temp_dir = tempdir().unwrap();
        let wordlist = temp_dir.path().join("words.txt");
        std::fs::write(&wordlist, VOCABULARY.join("\n")).unwrap();

        let mut settings = create_test_settings(6, 1);
        settings.input.wordlist_file = wordlist;
        let problem = LetterboxProblem::new(settings).unwrap();

        assert_eq!(problem.solve().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_word_list() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.input.wordlist_file = temp_dir.path().join("absent.txt");

        assert!(LetterboxProblem::new(settings).is_err());
    }
}
