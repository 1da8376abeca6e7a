//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::letterbox::LetterSideMap;
use crate::solve::Solution;
use anyhow::{Context, Result};
use std::path::Path;

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// One numbered line per solution: `Solution 1 (3 words): a → b → c`
    pub fn format_solution_line(index: usize, solution: &Solution) -> String {
        format!(
            "Solution {} ({} words): {}",
            index,
            solution.word_count(),
            solution.chain()
        )
    }

    /// Format a single solution for console or text-file output
    pub fn format_solution(solution: &Solution, side_map: Option<&LetterSideMap>) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.metadata.id));
        output.push_str(&format!("Chain: {}\n", solution.chain()));
        output.push_str(&format!("Words: {}\n", solution.metadata.word_count));
        output.push_str(&format!("Letters typed: {} ({} reused)\n",
                                solution.metadata.character_count,
                                solution.metadata.reused_letters));
        output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));

        if let Some(side_map) = side_map {
            output.push('\n');
            for word in &solution.words {
                output.push_str(&format!("{:<12} {}\n", word.as_str(), Self::format_side_trace(word, side_map)));
            }
        }

        output
    }

    /// Side index of each letter, e.g. `3-1-2-1` for "yeti"
    pub fn format_side_trace(word: &str, side_map: &LetterSideMap) -> String {
        word.chars()
            .map(|c| match side_map.side_of(c) {
                Some(side) => side.to_string(),
                None => "?".to_string(),
            })
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Format multiple solutions as a summary table
    pub fn format_solution_summary(solutions: &[Solution]) -> String {
        let mut output = String::new();

        output.push_str("Solutions Summary:\n");
        output.push_str("  # | Words | Letters | Chain\n");
        output.push_str("----|-------|---------|----------------------------\n");

        for (i, solution) in solutions.iter().enumerate() {
            output.push_str(&format!(
                "{:3} | {:5} | {:7} | {}\n",
                i + 1,
                solution.metadata.word_count,
                solution.metadata.character_count,
                solution.chain()
            ));
        }

        output
    }

    /// Render the square as its sides, one per line
    pub fn format_square(side_map: &LetterSideMap) -> String {
        let mut output = String::new();
        for (i, side) in side_map.sides().iter().enumerate() {
            let letters: Vec<String> = side.iter().map(|c| c.to_ascii_uppercase().to_string()).collect();
            output.push_str(&format!("Side {}: {}\n", i, letters.join(" ")));
        }
        output
    }

    /// Save solutions to files based on output format
    pub fn save_solutions<P: AsRef<Path>>(
        solutions: &[Solution],
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filename = format!("solution_{:03}.txt", i + 1);
                    let filepath = output_dir.join(filename);
                    let content = Self::format_solution(solution, None);
                    std::fs::write(&filepath, content)
                        .with_context(|| format!("Failed to write {}", filepath.display()))?;
                }
            }
            OutputFormat::Json => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filename = format!("solution_{:03}.json", i + 1);
                    solution.save_to_file(output_dir.join(filename))?;
                }

                // Also save a summary file
                let summary_path = output_dir.join("solutions_summary.json");
                let summaries: Vec<_> = solutions.iter().map(|s| s.summary()).collect();
                let summary_json = serde_json::to_string_pretty(&summaries)?;
                std::fs::write(summary_path, summary_json)?;
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letterbox::Word;
    use crate::search::Path as WordPath;
    use std::time::Duration;
    use tempfile::tempdir;

    fn sample_solutions() -> Vec<Solution> {
        [vec!["benzol", "limbos", "satiny"], vec!["limbo", "obey"]]
            .into_iter()
            .map(|words| {
                let path = WordPath {
                    words: words.into_iter().filter_map(Word::new).collect(),
                };
                Solution::new(path, Duration::from_millis(5))
            })
            .collect()
    }

    #[test]
    fn test_solution_line() {
        let solutions = sample_solutions();
        assert_eq!(
            SolutionFormatter::format_solution_line(1, &solutions[0]),
            "Solution 1 (3 words): benzol → limbos → satiny"
        );
    }

    #[test]
    fn test_side_trace() {
        let map = LetterSideMap::new(&["nom", "ize", "stb", "yla"]).unwrap();
        assert_eq!(SolutionFormatter::format_side_trace("yeti", &map), "3-1-2-1");
        assert_eq!(SolutionFormatter::format_side_trace("yex", &map), "3-1-?");

        let text = SolutionFormatter::format_solution(&sample_solutions()[1], Some(&map));
        assert!(text.contains("limbo"));
        assert!(text.contains("3-1-0-2-0"));
    }

    #[test]
    fn test_summary_table() {
        let summary = SolutionFormatter::format_solution_summary(&sample_solutions());
        assert!(summary.contains("benzol → limbos → satiny"));
        assert!(summary.contains("limbo → obey"));
    }

    #[test]
    fn test_square() {
        let map = LetterSideMap::new(&["nom", "ize"]).unwrap();
        assert_eq!(SolutionFormatter::format_square(&map), "Side 0: M N O\nSide 1: E I Z\n");
    }

    #[test]
    fn test_save_solutions() {
        let temp_dir = tempdir().unwrap();
        let solutions = sample_solutions();

        SolutionFormatter::save_solutions(&solutions, temp_dir.path(), &OutputFormat::Text).unwrap();
        assert!(temp_dir.path().join("solution_001.txt").exists());
        assert!(temp_dir.path().join("solution_002.txt").exists());

        let json_dir = temp_dir.path().join("json");
        SolutionFormatter::save_solutions(&solutions, &json_dir, &OutputFormat::Json).unwrap();
        assert!(json_dir.join("solutions_summary.json").exists());

        let loaded = Solution::load_from_file(json_dir.join("solution_002.json")).unwrap();
        assert!(loaded.is_equivalent_to(&solutions[1]));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
