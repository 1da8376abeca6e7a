//! Error types for puzzle construction and search

use thiserror::Error;

/// Errors raised while constructing a puzzle instance or its search.
///
/// Both variants are detected before any graph is built or any search
/// starts, so a caller never observes partially constructed state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The side definitions do not describe a usable square
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A tuning parameter is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core puzzle operations
pub type Result<T> = std::result::Result<T, PuzzleError>;
