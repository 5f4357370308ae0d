//! Line-oriented regex search across a directory tree.

use std::fs;
use std::path::Path;

use regex::Regex;
use walkdir::WalkDir;

use assistant_protocol::types::{FileMatches, LineMatch, SearchOutcome};

use crate::error::{FsError, Result};
use crate::listing::compile_glob;

/// Search every file under `directory` whose bare name matches
/// `file_pattern`, line by line. Unreadable or non-text files are logged
/// and skipped, never fatal.
pub fn search_in_files(directory: &str, pattern: &str, file_pattern: &str) -> Result<SearchOutcome> {
    let dir = Path::new(directory);
    if !dir.is_dir() {
        return Err(FsError::not_found(
            format!("Directory not found: {directory}"),
            directory,
        ));
    }

    let regex = Regex::new(pattern).map_err(|e| FsError::invalid_pattern(e.to_string()))?;
    let name_matcher = compile_glob(file_pattern)?;

    let mut results = Vec::new();
    let mut count = 0;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable entry under {directory}: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !name_matcher.is_match(Path::new(entry.file_name())) {
            continue;
        }

        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Error reading file {}: {err}", entry.path().display());
                continue;
            }
        };

        let matches: Vec<LineMatch> = content
            .lines()
            .enumerate()
            .filter(|(_, line)| regex.is_match(line))
            .map(|(index, line)| LineMatch {
                line_number: index + 1,
                line: line.to_string(),
            })
            .collect();

        if !matches.is_empty() {
            count += matches.len();
            results.push(FileMatches {
                file: entry.path().to_string_lossy().into_owned(),
                matches,
            });
        }
    }

    Ok(SearchOutcome {
        success: true,
        pattern: pattern.to_string(),
        file_pattern: file_pattern.to_string(),
        results,
        count,
    })
}
