//! Transition graph construction and letter-cover search

pub mod graph;
pub mod cover;

pub use graph::TransitionGraph;
pub use cover::{CoverSearch, Path, SearchLimits, DEFAULT_MAX_LENGTH, DEFAULT_SOLUTION_LIMIT};
