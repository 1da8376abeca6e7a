//! File I/O for word lists and puzzle definitions

use anyhow::{Context, Result};
use std::path::Path;

/// Sample word list written by `create_example_files`; it solves the
/// default `nom-ize-stb-yla` square and also carries entries the filter
/// must drop.
const SAMPLE_WORDLIST: &str = "\
amity
azo
benzol
botany
cat
Cat
ab
blaze
enzyme
limbo
limbos
meat
mist
most
oasis
obey
satiny
sent
size
table
tiny
yearn
yeti
zany
zoea
";

/// Load a word list from a text file.
/// Format: one word per line; surrounding whitespace and blank lines are ignored.
pub fn load_vocabulary<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read word list: {}", path.as_ref().display()))?;

    Ok(parse_vocabulary(&content))
}

/// Split word-list text into candidate words, without normalizing case
pub fn parse_vocabulary(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Save a word list, one word per line
pub fn save_vocabulary<P: AsRef<Path>, S: AsRef<str>>(words: &[S], path: P) -> Result<()> {
    let mut content = String::new();
    for word in words {
        content.push_str(word.as_ref());
        content.push('\n');
    }

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write word list: {}", path.as_ref().display()))?;

    Ok(())
}

/// Parse a puzzle string such as `nom-ize-stb-yla`, `nom,ize,stb,yla`
/// or `nom ize stb yla` into side strings.
pub fn parse_sides(text: &str) -> Result<Vec<String>> {
    let sides: Vec<String> = text
        .split(|c: char| c == '-' || c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if sides.is_empty() {
        anyhow::bail!("Puzzle definition '{}' contains no sides", text);
    }

    Ok(sides)
}

/// Create the sample word list in a directory
pub fn create_example_files<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    std::fs::write(dir.join("wordlist.txt"), SAMPLE_WORDLIST)
        .context("Failed to write wordlist.txt")?;

    Ok(())
}
