//! Recursive project tree, the shape editors render in a sidebar.

use std::fs;
use std::path::Path;

use assistant_protocol::types::{ProjectTree, TreeNode};

use crate::error::{FsError, Result};

/// Build the tree under `directory`. Dot-prefixed entries and `__pycache__`
/// are skipped; children are sorted by name.
pub fn project_tree(directory: &str) -> Result<ProjectTree> {
    let dir = Path::new(directory);
    if !dir.is_dir() {
        return Err(FsError::not_found(
            format!("Directory not found: {directory}"),
            directory,
        ));
    }

    let tree = build_node(dir, 0, directory)?;
    Ok(ProjectTree {
        success: true,
        tree,
    })
}

fn build_node(path: &Path, level: usize, origin: &str) -> Result<TreeNode> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    let path_text = path.to_string_lossy().into_owned();

    if path.is_file() {
        return Ok(TreeNode::File {
            name,
            path: path_text,
            level,
        });
    }

    let context = || format!("Error generating project structure for {origin}");
    let mut items = Vec::new();
    let entries = fs::read_dir(path).map_err(|e| FsError::io(context(), Some(origin), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| FsError::io(context(), Some(origin), e))?;
        let item = entry.file_name().to_string_lossy().into_owned();
        if item.starts_with('.') || item == "__pycache__" {
            continue;
        }
        items.push(item);
    }
    items.sort();

    let mut children = Vec::new();
    for item in items {
        children.push(build_node(&path.join(&item), level + 1, origin)?);
    }

    Ok(TreeNode::Directory {
        name,
        path: path_text,
        level,
        children,
    })
}
