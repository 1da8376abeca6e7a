//! Directed "can follow" graph over playable words

use crate::letterbox::Word;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Transition graph: an edge u → v exists iff the last letter of u is the
/// first letter of v and u ≠ v.
///
/// Nodes are stored in lexicographic order and addressed by index.
/// Successor lists are in the same order, which fixes the order in which
/// the search seeds and expands paths.
#[derive(Debug, Clone)]
pub struct TransitionGraph {
    words: Vec<Word>,
    successors: Vec<Vec<usize>>,
    index: HashMap<String, usize>,
}

impl TransitionGraph {
    /// Build the graph by bucketing words on their first letter and
    /// looking up each word's last letter in those buckets.
    pub fn build(words: &BTreeSet<Word>) -> Self {
        let words: Vec<Word> = words.iter().cloned().collect();

        // Indices are pushed in ascending order, so each bucket is sorted
        let mut buckets: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        for (i, word) in words.iter().enumerate() {
            buckets.entry(word.first()).or_default().push(i);
        }

        let successors: Vec<Vec<usize>> = words
            .par_iter()
            .enumerate()
            .map(|(i, word)| match buckets.get(&word.last()) {
                Some(bucket) => bucket.iter().copied().filter(|&j| j != i).collect(),
                None => Vec::new(),
            })
            .collect();

        let index = words
            .iter()
            .enumerate()
            .map(|(i, word)| (word.as_str().to_string(), i))
            .collect();

        Self {
            words,
            successors,
            index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.words.len()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All nodes in lexicographic order
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, node: usize) -> &Word {
        &self.words[node]
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn successors(&self, node: usize) -> &[usize] {
        &self.successors[node]
    }

    /// Successor words of `word`, or `None` if it is not a node
    pub fn successors_of(&self, word: &str) -> Option<Vec<&Word>> {
        let node = self.index_of(word)?;
        Some(self.successors[node].iter().map(|&j| &self.words[j]).collect())
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(u), Some(v)) => self.successors[u].binary_search(&v).is_ok(),
            _ => false,
        }
    }

    /// Iterate over every edge as (from, to) word pairs
    pub fn edges(&self) -> impl Iterator<Item = (&Word, &Word)> + '_ {
        self.successors.iter().enumerate().flat_map(move |(u, next)| {
            next.iter().map(move |&v| (&self.words[u], &self.words[v]))
        })
    }

    /// Words with no successors; a chain can only end on them
    pub fn dead_ends(&self) -> impl Iterator<Item = &Word> + '_ {
        self.successors
            .iter()
            .enumerate()
            .filter(|(_, next)| next.is_empty())
            .map(move |(u, _)| &self.words[u])
    }
}
