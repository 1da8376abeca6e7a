//! Letterboxed word-chain puzzle solver
//!
//! This library finds chains of dictionary words that together use every
//! letter on a Letterboxed square, using a transition graph over the
//! playable words and a bounded breadth-first cover search.

pub mod config;
pub mod error;
pub mod letterbox;
pub mod search;
pub mod solve;
pub mod utils;

pub use config::Settings;
pub use error::PuzzleError;
pub use letterbox::{LetterSideMap, Word, WordValidator};
pub use search::{CoverSearch, SearchLimits, TransitionGraph};
pub use solve::{LetterboxProblem, Solution};

use anyhow::Result;

/// Main entry point for solving a Letterboxed puzzle
pub fn solve_letterboxed(settings: Settings) -> Result<Vec<Solution>> {
    let problem = LetterboxProblem::new(settings)?;
    problem.solve()
}
