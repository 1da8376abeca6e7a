//! Bounded breadth-first search for letter-covering word chains

use super::TransitionGraph;
use crate::error::{PuzzleError, Result};
use crate::letterbox::Word;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;
use tracing::debug;

pub const DEFAULT_MAX_LENGTH: usize = 6;
pub const DEFAULT_SOLUTION_LIMIT: usize = 10;

/// Coverage is tracked as a bit mask over the target letters
pub const MAX_TARGET_LETTERS: usize = u64::BITS as usize;

/// Bounds on a single search run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    max_length: usize,
    solution_limit: usize,
}

impl SearchLimits {
    pub fn new(max_length: usize, solution_limit: usize) -> Result<Self> {
        if max_length < 1 {
            return Err(PuzzleError::InvalidParameter(
                "max_length must be at least 1".to_string(),
            ));
        }
        if solution_limit < 1 {
            return Err(PuzzleError::InvalidParameter(
                "solution_limit must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_length,
            solution_limit,
        })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn solution_limit(&self) -> usize {
        self.solution_limit
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            solution_limit: DEFAULT_SOLUTION_LIMIT,
        }
    }
}

/// An ordered chain of distinct words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub words: Vec<Word>,
}

impl Path {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Union of the letters of every word on the path
    pub fn letters(&self) -> BTreeSet<char> {
        self.words.iter().flat_map(|w| w.chars()).collect()
    }

    pub fn covers(&self, target: &BTreeSet<char>) -> bool {
        self.letters().is_superset(target)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words.iter().join(" → "))
    }
}

// One queued partial path; the words are recovered through `parent`
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    node: usize,
    parent: Option<usize>,
    depth: usize,
    covered: u64,
}

/// Breadth-first enumeration of paths whose letters cover a target set.
///
/// Paths are popped in FIFO order. A popped path that covers the target is
/// emitted and not extended. One that does not is extended by every
/// successor not already on it, unless it has reached `max_length`. The
/// run stops once `solution_limit` paths have been emitted or the queue
/// drains, so shorter chains are always reported first.
pub struct CoverSearch<'g> {
    graph: &'g TransitionGraph,
    limits: SearchLimits,
    target_mask: u64,
    word_masks: Vec<u64>,
    start_nodes: Vec<usize>,
}

impl<'g> CoverSearch<'g> {
    /// Prepare a search seeded from every node of the graph.
    ///
    /// An empty target makes every single word a solution.
    pub fn new(
        graph: &'g TransitionGraph,
        target_letters: &BTreeSet<char>,
        limits: SearchLimits,
    ) -> Result<Self> {
        if target_letters.len() > MAX_TARGET_LETTERS {
            return Err(PuzzleError::Configuration(format!(
                "target has {} letters, at most {} are supported",
                target_letters.len(),
                MAX_TARGET_LETTERS
            )));
        }

        let bit_of: HashMap<char, u64> = target_letters
            .iter()
            .enumerate()
            .map(|(i, &letter)| (letter, 1u64 << i))
            .collect();

        // Letters outside the target never affect coverage
        let word_masks = graph
            .words()
            .iter()
            .map(|word| {
                word.chars()
                    .filter_map(|c| bit_of.get(&c))
                    .fold(0u64, |mask, bit| mask | bit)
            })
            .collect();

        let target_mask = bit_of.values().fold(0u64, |mask, bit| mask | bit);

        Ok(Self {
            graph,
            limits,
            target_mask,
            word_masks,
            start_nodes: (0..graph.node_count()).collect(),
        })
    }

    /// Restrict the seeds to the given words, kept in graph order.
    /// Words that are not nodes of the graph are ignored.
    pub fn with_start_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nodes = BTreeSet::new();
        for word in words {
            match self.graph.index_of(word.as_ref()) {
                Some(node) => {
                    nodes.insert(node);
                }
                None => debug!(word = word.as_ref(), "ignoring start word not in graph"),
            }
        }
        self.start_nodes = nodes.into_iter().collect();
        self
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Run the search to completion or to its limits
    pub fn run(&self) -> Vec<Path> {
        let mut arena: Vec<SearchNode> = Vec::with_capacity(self.start_nodes.len());
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(self.start_nodes.len());
        let mut solutions = Vec::new();
        let mut pruned = 0usize;

        for &node in &self.start_nodes {
            queue.push_back(arena.len());
            arena.push(SearchNode {
                node,
                parent: None,
                depth: 1,
                covered: self.word_masks[node],
            });
        }

        while solutions.len() < self.limits.solution_limit {
            let Some(id) = queue.pop_front() else {
                break;
            };
            let current = arena[id];

            if current.covered & self.target_mask == self.target_mask {
                solutions.push(self.materialize(&arena, id));
                continue;
            }

            if current.depth >= self.limits.max_length {
                pruned += 1;
                continue;
            }

            for &next in self.graph.successors(current.node) {
                if self.on_path(&arena, id, next) {
                    continue;
                }
                queue.push_back(arena.len());
                arena.push(SearchNode {
                    node: next,
                    parent: Some(id),
                    depth: current.depth + 1,
                    covered: current.covered | self.word_masks[next],
                });
            }
        }

        debug!(
            solutions = solutions.len(),
            expanded = arena.len(),
            pruned,
            "cover search finished"
        );

        solutions
    }

    fn on_path(&self, arena: &[SearchNode], mut id: usize, node: usize) -> bool {
        loop {
            let entry = &arena[id];
            if entry.node == node {
                return true;
            }
            match entry.parent {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn materialize(&self, arena: &[SearchNode], id: usize) -> Path {
        let mut nodes = Vec::with_capacity(arena[id].depth);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            nodes.push(arena[current].node);
            cursor = arena[current].parent;
        }
        nodes.reverse();

        Path {
            words: nodes.into_iter().map(|n| self.graph.word(n).clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(words: &[&str]) -> TransitionGraph {
        let set: BTreeSet<Word> = words.iter().filter_map(|w| Word::new(*w)).collect();
        TransitionGraph::build(&set)
    }

    fn letters(s: &str) -> BTreeSet<char> {
        s.chars().collect()
    }

    fn rendered(paths: &[Path]) -> Vec<String> {
        paths.iter().map(Path::to_string).collect()
    }

    const SAMPLE: &[&str] = &[
        "amity", "azo", "benzol", "botany", "enzyme", "limbo", "limbos", "meat", "oasis",
        "obey", "satiny", "sent", "table", "tiny", "yeti", "zany", "zoea",
    ];

    #[test]
    fn test_limits_validation() {
        assert!(matches!(
            SearchLimits::new(0, 3),
            Err(PuzzleError::InvalidParameter(_))
        ));
        assert!(matches!(
            SearchLimits::new(6, 0),
            Err(PuzzleError::InvalidParameter(_))
        ));
        let limits = SearchLimits::new(6, 3).unwrap();
        assert_eq!(limits.max_length(), 6);
        assert_eq!(limits.solution_limit(), 3);
    }

    #[test]
    fn test_finds_covering_chain() {
        let graph = graph_of(SAMPLE);
        let target = letters("nomizestbyla");
        let search = CoverSearch::new(&graph, &target, SearchLimits::new(6, 1).unwrap()).unwrap();

        let solutions = search.run();
        assert_eq!(solutions.len(), 1);
        assert_eq!(rendered(&solutions), vec!["benzol → limbos → satiny"]);
    }

    #[test]
    fn test_solution_properties() {
        let graph = graph_of(SAMPLE);
        let target = letters("nomizestbyla");
        let search = CoverSearch::new(&graph, &target, SearchLimits::new(5, 20).unwrap()).unwrap();

        let solutions = search.run();
        assert!(!solutions.is_empty());
        for path in &solutions {
            assert!(path.len() <= 5);
            assert!(path.covers(&target));
            let distinct: BTreeSet<&Word> = path.words.iter().collect();
            assert_eq!(distinct.len(), path.len());
            for pair in path.words.windows(2) {
                assert_eq!(pair[0].last(), pair[1].first());
            }
        }
        // Breadth-first: lengths never decrease
        assert!(solutions.windows(2).all(|p| p[0].len() <= p[1].len()));
    }

    #[test]
    fn test_covering_path_is_not_extended() {
        // "ab" alone covers; its extension "ab → ba" must not be reported
        let graph = graph_of(&["ab", "ba"]);
        let target = letters("ab");
        let search = CoverSearch::new(&graph, &target, SearchLimits::new(3, 10).unwrap()).unwrap();

        assert_eq!(rendered(&search.run()), vec!["ab", "ba"]);
    }

    #[test]
    fn test_empty_target_returns_first_words() {
        let graph = graph_of(SAMPLE);
        let search =
            CoverSearch::new(&graph, &BTreeSet::new(), SearchLimits::new(6, 2).unwrap()).unwrap();

        assert_eq!(rendered(&search.run()), vec!["amity", "azo"]);
    }

    #[test]
    fn test_no_edges_only_single_word_covers() {
        let graph = graph_of(&["abc", "def", "ghi"]);
        assert_eq!(graph.edge_count(), 0);

        let target = letters("abcdef");
        let search = CoverSearch::new(&graph, &target, SearchLimits::default()).unwrap();
        assert!(search.run().is_empty());

        let target = letters("ac");
        let search = CoverSearch::new(&graph, &target, SearchLimits::default()).unwrap();
        assert_eq!(rendered(&search.run()), vec!["abc"]);
    }

    #[test]
    fn test_max_length_bounds_search() {
        let graph = graph_of(SAMPLE);
        let target = letters("nomizestbyla");

        let short = CoverSearch::new(&graph, &target, SearchLimits::new(2, 10).unwrap()).unwrap();
        assert!(short.run().is_empty());

        let one = CoverSearch::new(&graph, &letters("t"), SearchLimits::new(1, 100).unwrap()).unwrap();
        assert!(one.run().iter().all(|p| p.len() == 1));
    }

    #[test]
    fn test_cycle_without_cover_terminates() {
        // ab ↔ ba is the only cycle; without word reuse no path is longer than 2
        let graph = graph_of(&["ab", "ba"]);
        let target = letters("abc");
        let search = CoverSearch::new(&graph, &target, SearchLimits::new(1000, 10).unwrap()).unwrap();

        assert!(search.run().is_empty());
    }

    #[test]
    fn test_deterministic_and_stable_prefix() {
        let graph = graph_of(SAMPLE);
        let target = letters("nomizestbyla");

        let run = |limit| {
            CoverSearch::new(&graph, &target, SearchLimits::new(6, limit).unwrap())
                .unwrap()
                .run()
        };

        let first = run(3);
        assert_eq!(first, run(3));

        let more = run(8);
        assert!(more.len() >= first.len());
        assert_eq!(&more[..first.len()], &first[..]);
    }

    #[test]
    fn test_start_words_restrict_seeds() {
        let graph = graph_of(SAMPLE);
        let search = CoverSearch::new(&graph, &BTreeSet::new(), SearchLimits::new(6, 5).unwrap())
            .unwrap()
            .with_start_words(["yeti", "unknown", "benzol"]);

        assert_eq!(rendered(&search.run()), vec!["benzol", "yeti"]);
    }

    #[test]
    fn test_graph_reused_across_searches() {
        let graph = graph_of(SAMPLE);

        let narrow = CoverSearch::new(&graph, &letters("zb"), SearchLimits::new(1, 5).unwrap())
            .unwrap()
            .run();
        assert_eq!(rendered(&narrow), vec!["benzol"]);

        let wide = CoverSearch::new(&graph, &letters("zb"), SearchLimits::new(2, 2).unwrap())
            .unwrap()
            .run();
        assert_eq!(rendered(&wide), vec!["benzol", "azo → obey"]);
    }

    #[test]
    fn test_too_many_target_letters() {
        let graph = graph_of(&["abc"]);
        let target: BTreeSet<char> = (0..70u32).filter_map(|i| char::from_u32(0x100 + i)).collect();

        assert!(CoverSearch::new(&graph, &target, SearchLimits::default()).is_err());
    }
}
