//! Line-oriented input lists
//!
//! Keyword files hold one search query per line. Domain files use the same
//! format as the discovery output, one domain per line.

use crate::crawler::DomainSet;
use crate::Result;
use std::fs;
use std::path::Path;

/// Loads keywords from a file
///
/// Each line is trimmed. Blank lines are kept as empty keywords so the
/// keyword positions reported during discovery match the file.
pub fn load_keywords(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_keywords(&content))
}

/// Loads a domain list written by a previous discovery run
///
/// Blank lines are skipped and duplicates collapse.
pub fn load_domains(path: &Path) -> Result<DomainSet> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn parse_keywords(content: &str) -> Vec<String> {
    content.lines().map(|line| line.trim().to_string()).collect()
}
