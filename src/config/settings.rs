//! Configuration settings for the Letterboxed solver

use crate::letterbox::{LetterSideMap, WordValidator, DEFAULT_MIN_LENGTH};
use crate::search::{SearchLimits, DEFAULT_MAX_LENGTH, DEFAULT_SOLUTION_LIMIT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub puzzle: PuzzleConfig,
    pub search: SearchConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub sides: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub min_word_length: usize,
    pub max_chain_length: usize,
    pub solution_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub wordlist_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_solutions: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            puzzle: PuzzleConfig {
                sides: ["nom", "ize", "stb", "yla"].iter().map(|s| s.to_string()).collect(),
            },
            search: SearchConfig {
                min_word_length: DEFAULT_MIN_LENGTH,
                max_chain_length: DEFAULT_MAX_LENGTH,
                solution_limit: DEFAULT_SOLUTION_LIMIT,
            },
            input: InputConfig {
                wordlist_file: PathBuf::from("input/wordlist.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_solutions: false,
                output_directory: PathBuf::from("output/solutions"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings by running the same checks puzzle
    /// construction will, without touching the word list
    pub fn validate(&self) -> Result<()> {
        let side_map = self.side_map()?;
        WordValidator::new(&side_map, self.search.min_word_length)?;
        self.search_limits()?;
        Ok(())
    }

    pub fn side_map(&self) -> Result<LetterSideMap> {
        Ok(LetterSideMap::new(&self.puzzle.sides)?)
    }

    pub fn search_limits(&self) -> Result<SearchLimits> {
        Ok(SearchLimits::new(
            self.search.max_chain_length,
            self.search.solution_limit,
        )?)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref sides) = cli_overrides.sides {
            self.puzzle.sides = sides.clone();
        }
        if let Some(min_length) = cli_overrides.min_word_length {
            self.search.min_word_length = min_length;
        }
        if let Some(max_length) = cli_overrides.max_chain_length {
            self.search.max_chain_length = max_length;
        }
        if let Some(limit) = cli_overrides.solution_limit {
            self.search.solution_limit = limit;
        }
        if let Some(ref wordlist) = cli_overrides.wordlist_file {
            self.input.wordlist_file = wordlist.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if cli_overrides.save_solutions {
            self.output.save_solutions = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub sides: Option<Vec<String>>,
    pub min_word_length: Option<usize>,
    pub max_chain_length: Option<usize>,
    pub solution_limit: Option<usize>,
    pub wordlist_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub save_solutions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.search.min_word_length, 3);
        assert_eq!(settings.search.max_chain_length, 6);
        assert_eq!(settings.search.solution_limit, 10);
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.search.solution_limit = 3;
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.search.solution_limit, 3);
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.puzzle.sides, settings.puzzle.sides);
    }

    #[test]
    fn test_parse_yaml_document() {
        let yaml = r#"
puzzle:
  sides: [abc, def, ghi, jkl]
search:
  min_word_length: 4
  max_chain_length: 3
  solution_limit: 5
input:
  wordlist_file: words.txt
output:
  format: text
  save_solutions: true
  output_directory: out
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.puzzle.sides.len(), 4);
        assert_eq!(settings.search.min_word_length, 4);
        assert!(settings.output.save_solutions);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.search.solution_limit = 0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PuzzleError>(),
            Some(PuzzleError::InvalidParameter(_))
        ));

        let mut settings = Settings::default();
        settings.puzzle.sides = vec!["abc".to_string(), "cde".to_string()];
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PuzzleError>(),
            Some(PuzzleError::Configuration(_))
        ));

        let mut settings = Settings::default();
        settings.search.min_word_length = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            sides: Some(vec!["ab".to_string(), "cd".to_string()]),
            max_chain_length: Some(4),
            save_solutions: true,
            ..Default::default()
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.puzzle.sides, vec!["ab", "cd"]);
        assert_eq!(settings.search.max_chain_length, 4);
        assert_eq!(settings.search.solution_limit, 10);
        assert!(settings.output.save_solutions);
    }
}
