//! Configuration management for the Letterboxed solver

pub mod settings;

pub use settings::{
    Settings, PuzzleConfig, SearchConfig, InputConfig, OutputConfig, OutputFormat, CliOverrides
};
