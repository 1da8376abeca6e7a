//! Puzzle definition: sides, playable words, word-list files

pub mod sides;
pub mod words;
pub mod io;

pub use sides::LetterSideMap;
pub use words::{Word, WordValidator, Rejection, DEFAULT_MIN_LENGTH};
pub use io::{load_vocabulary, parse_sides, create_example_files};
