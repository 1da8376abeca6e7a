//! Letterboxed problem definition and solution handling

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::{LetterboxProblem, PuzzleStatistics};
pub use solution::Solution;
pub use validator::{ChainValidator, ValidationResult};
