//! Success payload records shared by the server and the client.
//!
//! Every record carries an explicit `success` flag so callers can check a
//! reply without inspecting the MCP error flag first. Field sets mirror the
//! tool surface one to one.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `list_files` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FileList {
    pub success: bool,
    #[schemars(description = "Matched paths joined to the searched directory, sorted")]
    pub files: Vec<String>,
}

/// `get_file` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FileContent {
    pub success: bool,
    pub path: String,
    pub content: String,
}

/// Plain acknowledgement: `update_file`, `delete_file`, `delete_directory`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OpAck {
    pub success: bool,
    pub message: String,
}

/// Acknowledgement plus the path acted on: `create_directory`,
/// `create_temp_directory`, `create_temp_file`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PathAck {
    pub success: bool,
    pub message: String,
    pub path: String,
}

/// `create_file` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateFileResult {
    pub success: bool,
    pub message: String,
    pub path: String,
    #[schemars(description = "True when the file existed and was overwritten")]
    pub existed_before: bool,
}

/// `copy_file`, `copy_directory`, `move_file`, `move_directory` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TransferAck {
    pub success: bool,
    pub message: String,
    pub source: String,
    pub destination: String,
}

/// `rename_file`, `rename_directory` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenameAck {
    pub success: bool,
    pub message: String,
    pub old_path: String,
    pub new_path: String,
}

/// Stat record inside a [`FileInfoResult`]. Timestamps are seconds since the
/// Unix epoch; `permissions` is the low nine mode bits as three octal digits.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FileInfo {
    pub path: String,
    pub size: u64,
    pub last_modified: f64,
    pub created: f64,
    pub is_directory: bool,
    pub permissions: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Extension including the leading dot; present for files only")]
    pub extension: Option<String>,
}

/// `get_file_info` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FileInfoResult {
    pub success: bool,
    pub info: FileInfo,
}

/// `run_tests` reply. `success` reflects the exit status, so a run with
/// failing tests is still a well-formed reply, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub returncode: i32,
}

/// `lint_code` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LintOutput {
    pub success: bool,
    pub output: String,
    pub errors: String,
    pub returncode: i32,
}

/// One node of the project tree. `level` is the depth below the requested
/// root (root itself is level 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    File {
        name: String,
        path: String,
        level: usize,
    },
    Directory {
        name: String,
        path: String,
        level: usize,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File { name, .. } | TreeNode::Directory { name, .. } => name,
        }
    }
}

/// `get_project_tree` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProjectTree {
    pub success: bool,
    pub tree: TreeNode,
}

/// One matching line inside a searched file (1-based line numbers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineMatch {
    pub line_number: usize,
    pub line: String,
}

/// All matches inside one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileMatches {
    pub file: String,
    pub matches: Vec<LineMatch>,
}

/// `search_in_files` reply. `count` is the total number of matching lines
/// across all files.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchOutcome {
    pub success: bool,
    pub pattern: String,
    pub file_pattern: String,
    pub results: Vec<FileMatches>,
    pub count: usize,
}

/// `find_files` reply. `matches` are the paths as joined to the searched
/// directory; `relative_matches` are the same entries relative to it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindOutcome {
    pub success: bool,
    pub pattern: String,
    pub recursive: bool,
    pub matches: Vec<String>,
    pub relative_matches: Vec<String>,
    pub count: usize,
}

/// `zip_directory` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ZipOutcome {
    pub success: bool,
    pub message: String,
    pub source_directory: String,
    pub zip_file: String,
}

/// `unzip_file` reply. `extracted_items` lists the entries of the extraction
/// directory after extraction, joined to it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UnzipOutcome {
    pub success: bool,
    pub message: String,
    pub zip_file: String,
    pub extract_directory: String,
    pub extracted_items: Vec<String>,
}

/// `update_readme` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadmeOutcome {
    pub success: bool,
    pub message: String,
    pub created_new: bool,
    pub path: String,
}
