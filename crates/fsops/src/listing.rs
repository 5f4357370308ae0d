//! Glob-based listing and finding.
//!
//! Patterns use shell glob syntax where `*` never crosses a path separator
//! and `**` stands for any number of directories. As with shell globs,
//! dot-prefixed entries stay hidden unless the pattern itself names one.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use walkdir::WalkDir;

use assistant_protocol::types::{FileList, FindOutcome};

use crate::error::{FsError, Result};

pub fn list_files(directory: &str, pattern: &str) -> Result<FileList> {
    let dir = Path::new(directory);
    if !dir.is_dir() {
        return Err(FsError::not_found(
            format!("Directory not found: {directory}"),
            directory,
        ));
    }

    let matcher = compile_glob(pattern)?;
    let show_hidden = pattern_names_hidden(pattern);

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable entry under {directory}: {err}");
                continue;
            }
        };
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        if !show_hidden && has_hidden_component(relative) {
            continue;
        }
        if matcher.is_match(relative) {
            files.push(entry.path().to_string_lossy().into_owned());
        }
    }

    files.sort();
    Ok(FileList {
        success: true,
        files,
    })
}

/// Find entries matching `pattern` under `directory`. The recursive form
/// matches at any depth; otherwise the pattern applies from the top only,
/// so `*.py` cannot reach into subdirectories.
pub fn find_files(directory: &str, pattern: &str, recursive: bool) -> Result<FindOutcome> {
    let dir = Path::new(directory);
    if !dir.is_dir() {
        return Err(FsError::not_found(
            format!("Directory not found: {directory}"),
            directory,
        ));
    }

    let effective = if recursive {
        format!("**/{pattern}")
    } else {
        pattern.to_string()
    };
    let matcher = compile_glob(&effective)?;
    let show_hidden = pattern_names_hidden(pattern);

    let mut paired = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable entry under {directory}: {err}");
                continue;
            }
        };
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        if !show_hidden && has_hidden_component(relative) {
            continue;
        }
        if matcher.is_match(relative) {
            paired.push((
                entry.path().to_string_lossy().into_owned(),
                relative.to_string_lossy().into_owned(),
            ));
        }
    }

    paired.sort();
    let count = paired.len();
    let (matches, relative_matches) = paired.into_iter().unzip();
    Ok(FindOutcome {
        success: true,
        pattern: pattern.to_string(),
        recursive,
        matches,
        relative_matches,
        count,
    })
}

pub(crate) fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| FsError::invalid_pattern(e.to_string()))
}

fn pattern_names_hidden(pattern: &str) -> bool {
    pattern.split('/').any(|part| part.starts_with('.'))
}

fn has_hidden_component(relative: &Path) -> bool {
    relative
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}
