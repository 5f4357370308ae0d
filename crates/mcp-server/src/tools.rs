//! MCP Tools for Code Assistant
//!
//! Exposes filesystem, subprocess, and Python analysis tools to AI agents
//! via MCP protocol. Every reply is a single JSON record carrying an
//! explicit `success` flag; domain failures become MCP error-flagged
//! results, never transport errors.

use assistant_analysis::{AnalysisError, SelectionPolicy, TargetQuery};
use assistant_fsops::FsError;
use assistant_protocol::{ErrorBody, ErrorKind};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo,
};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

/// Environment variable selecting how name collisions resolve in
/// `generate_docstring` (`first` or `error`).
pub const AMBIGUOUS_TARGETS_ENV: &str = "CODE_ASSISTANT_AMBIGUOUS_TARGETS";

/// Code Assistant MCP Service
#[derive(Clone)]
pub struct CodeAssistantService {
    /// Arbitration for docstring name queries matching several declarations
    policy: SelectionPolicy,
    /// Tool router
    tool_router: ToolRouter<Self>,
}

impl CodeAssistantService {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            tool_router: Self::tool_router(),
        }
    }

    /// Build the service with the ambiguity policy taken from
    /// [`AMBIGUOUS_TARGETS_ENV`]. Unknown values fall back to the default
    /// with a logged warning.
    pub fn from_env() -> Self {
        let policy = match std::env::var(AMBIGUOUS_TARGETS_ENV) {
            Ok(raw) => SelectionPolicy::from_setting(&raw).unwrap_or_else(|| {
                log::warn!(
                    "Ignoring {AMBIGUOUS_TARGETS_ENV}={raw:?}; expected 'first' or 'error'"
                );
                SelectionPolicy::default()
            }),
            Err(_) => SelectionPolicy::default(),
        };
        Self::new(policy)
    }
}

impl Default for CodeAssistantService {
    fn default() -> Self {
        Self::new(SelectionPolicy::default())
    }
}

#[tool_handler]
impl ServerHandler for CodeAssistantService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Code Assistant provides project editing tools for AI agents: file and directory management, glob and regex search, Python structure analysis with docstring suggestions, and pytest/flake8 wrappers. Every reply is one JSON record with an explicit 'success' flag; failed calls carry a 'kind' field to branch on.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

/// Wraps a bare analysis payload in the reply envelope's success flag.
#[derive(Debug, Serialize)]
struct Enveloped<T> {
    success: bool,
    #[serde(flatten)]
    payload: T,
}

fn ok_json<T: Serialize>(payload: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        assistant_protocol::serialize_json(payload).unwrap_or_default(),
    )]))
}

fn err_json(body: ErrorBody) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(
        assistant_protocol::serialize_json(&body).unwrap_or_default(),
    )]))
}

fn fs_err(err: FsError) -> Result<CallToolResult, McpError> {
    let mut body = ErrorBody::new(err.kind(), err.to_string());
    if let Some(path) = err.path() {
        body = body.with_path(path);
    }
    err_json(body)
}

fn analysis_err(file_path: &str, err: AnalysisError) -> Result<CallToolResult, McpError> {
    let kind = match &err {
        AnalysisError::ParseError(_) => ErrorKind::ParseError,
        AnalysisError::UnsupportedLanguage(_) => ErrorKind::WrongKind,
        AnalysisError::NoTarget => ErrorKind::NoOp,
        AnalysisError::AmbiguousTarget { .. } => ErrorKind::Ambiguous,
    };
    err_json(ErrorBody::new(kind, err.to_string()).with_path(file_path))
}

/// Explicit names win over line positions; with neither, the first
/// undocumented object in the file is the target.
fn docstring_target(object_name: Option<String>, line_number: Option<usize>) -> TargetQuery {
    match (object_name, line_number) {
        (Some(name), _) => TargetQuery::ByName(name),
        (None, Some(line)) => TargetQuery::ByLine(line),
        (None, None) => TargetQuery::FirstUndocumented,
    }
}

// ============================================================================
// Tool Input Schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFilesRequest {
    #[schemars(description = "Directory to list")]
    pub directory: String,

    /// Defaults to `*.py`.
    #[schemars(description = "Glob pattern; use ** to recurse into subdirectories")]
    pub pattern: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetFileRequest {
    #[schemars(description = "Path of the file to read")]
    pub file_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFileRequest {
    #[schemars(description = "Path of the file to overwrite")]
    pub file_path: String,

    #[schemars(description = "New file content")]
    pub content: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeCodeRequest {
    #[schemars(description = "Path to the Python file")]
    pub file_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateDocstringRequest {
    #[schemars(description = "Path to the Python file")]
    pub file_path: String,

    #[schemars(description = "Name of the function or class to document")]
    pub object_name: Option<String>,

    #[schemars(description = "1-based line of the def or class keyword")]
    pub line_number: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProjectTreeRequest {
    #[schemars(description = "Root directory of the tree")]
    pub directory: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RunTestsRequest {
    #[schemars(description = "Directory to hand to pytest")]
    pub directory: String,

    /// Defaults to `test_*.py`; pytest applies its own collection rules.
    #[schemars(description = "Test file pattern")]
    pub pattern: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LintCodeRequest {
    #[schemars(description = "Path to the Python file to lint")]
    pub file_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateDirectoryRequest {
    #[schemars(description = "Directory path to create")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteFileRequest {
    #[schemars(description = "Path of the file to delete")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteDirectoryRequest {
    #[schemars(description = "Path of the directory to delete")]
    pub path: String,

    /// Defaults to false; a non-recursive delete requires an empty directory.
    #[schemars(description = "Delete contents as well")]
    pub recursive: Option<bool>,
}

/// Shared by the copy and move tools.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TransferRequest {
    #[schemars(description = "Source path")]
    pub source: String,

    #[schemars(description = "Destination path")]
    pub destination: String,
}

/// Shared by the rename tools.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenameRequest {
    #[schemars(description = "Path to rename")]
    pub source: String,

    #[schemars(description = "New name, joined to the source's parent directory")]
    pub new_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FileInfoRequest {
    #[schemars(description = "Path to stat")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchInFilesRequest {
    #[schemars(description = "Directory to search under")]
    pub directory: String,

    #[schemars(description = "Regular expression matched against each line")]
    pub pattern: String,

    /// Defaults to `*.py`. Matched against bare file names at any depth.
    #[schemars(description = "Glob filter on file names")]
    pub file_pattern: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FindFilesRequest {
    #[schemars(description = "Directory to search under")]
    pub directory: String,

    #[schemars(description = "File name glob pattern")]
    pub pattern: String,

    /// Defaults to true.
    #[schemars(description = "Search subdirectories as well")]
    pub recursive: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateFileRequest {
    #[schemars(description = "Path of the file to create")]
    pub file_path: String,

    /// Defaults to empty.
    #[schemars(description = "Initial file content")]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ZipDirectoryRequest {
    #[schemars(description = "Directory to archive")]
    pub directory: String,

    /// Defaults to `<parent>/<dirname>.zip`.
    #[schemars(description = "Path of the archive to write")]
    pub output_path: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UnzipFileRequest {
    #[schemars(description = "Path of the zip archive")]
    pub zip_path: String,

    /// Defaults to the archive's parent directory.
    #[schemars(description = "Directory to extract into")]
    pub extract_to: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateTempDirectoryRequest {}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateTempFileRequest {
    #[schemars(description = "File name suffix, e.g. '.py'")]
    pub suffix: Option<String>,

    #[schemars(description = "File name prefix")]
    pub prefix: Option<String>,

    #[schemars(description = "Directory to create the file in; defaults to the system temp dir")]
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateReadmeRequest {
    #[schemars(description = "Project directory holding README.md")]
    pub project_dir: String,

    #[schemars(description = "Section names to flag as needing updates")]
    pub sections: Option<Vec<String>>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CodeAssistantService {
    #[tool(description = "List files in a directory matching a glob pattern. Use ** in the pattern to recurse into subdirectories.")]
    pub async fn list_files(
        &self,
        Parameters(request): Parameters<ListFilesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let pattern = request.pattern.unwrap_or_else(|| "*.py".to_string());
        match assistant_fsops::list_files(&request.directory, &pattern) {
            Ok(listing) => ok_json(&listing),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Read the contents of a text file.")]
    pub async fn get_file(
        &self,
        Parameters(request): Parameters<GetFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::read_file(&request.file_path) {
            Ok(file) => ok_json(&file),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Overwrite an existing file with new content.")]
    pub async fn update_file(
        &self,
        Parameters(request): Parameters<UpdateFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::update_file(&request.file_path, &request.content) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    /// Structure report: classes, functions, imports, docstring coverage
    #[tool(description = "Analyze a Python file and report its classes, functions, imports, and docstring coverage.")]
    pub async fn analyze_code(
        &self,
        Parameters(request): Parameters<AnalyzeCodeRequest>,
    ) -> Result<CallToolResult, McpError> {
        if !request.file_path.ends_with(".py") {
            return err_json(
                ErrorBody::new(
                    ErrorKind::WrongKind,
                    "Only Python files are supported for analysis",
                )
                .with_path(request.file_path),
            );
        }
        let file = match assistant_fsops::read_file(&request.file_path) {
            Ok(file) => file,
            Err(err) => return fs_err(err),
        };
        match assistant_analysis::analyze_source(&request.file_path, &file.content) {
            Ok(report) => ok_json(&Enveloped {
                success: true,
                payload: report,
            }),
            Err(err) => analysis_err(&request.file_path, err),
        }
    }

    /// Docstring template for a named object, a line, or the first
    /// undocumented one
    #[tool(description = "Suggest a docstring for a Python function, class, or module. Targets by object name, by line number, or the first undocumented object when neither is given.")]
    pub async fn generate_docstring(
        &self,
        Parameters(request): Parameters<GenerateDocstringRequest>,
    ) -> Result<CallToolResult, McpError> {
        let file = match assistant_fsops::read_file(&request.file_path) {
            Ok(file) => file,
            Err(err) => return fs_err(err),
        };
        let query = docstring_target(request.object_name, request.line_number);
        match assistant_analysis::suggest_docstring(
            &request.file_path,
            &file.content,
            &query,
            self.policy,
        ) {
            Ok(suggestion) => ok_json(&Enveloped {
                success: true,
                payload: suggestion,
            }),
            Err(err) => analysis_err(&request.file_path, err),
        }
    }

    #[tool(description = "Get the directory tree of a project, skipping hidden entries and __pycache__.")]
    pub async fn get_project_tree(
        &self,
        Parameters(request): Parameters<ProjectTreeRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::project_tree(&request.directory) {
            Ok(tree) => ok_json(&tree),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Run pytest on a directory and return stdout, stderr, and the exit code. success reflects the exit status.")]
    pub async fn run_tests(
        &self,
        Parameters(request): Parameters<RunTestsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let directory = request.directory;
        let pattern = request.pattern.unwrap_or_else(|| "test_*.py".to_string());
        let result = match tokio::task::spawn_blocking(move || {
            assistant_fsops::run_tests(&directory, &pattern)
        })
        .await
        {
            Ok(result) => result,
            Err(err) => Err(FsError::operation_failed(format!("join pytest task: {err}"))),
        };
        match result {
            Ok(output) => ok_json(&output),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Lint a Python file with flake8. success reflects the exit status.")]
    pub async fn lint_code(
        &self,
        Parameters(request): Parameters<LintCodeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let file_path = request.file_path;
        let result =
            match tokio::task::spawn_blocking(move || assistant_fsops::lint_code(&file_path))
                .await
            {
                Ok(result) => result,
                Err(err) => Err(FsError::operation_failed(format!("join flake8 task: {err}"))),
            };
        match result {
            Ok(output) => ok_json(&output),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Create a directory, including any missing parents.")]
    pub async fn create_directory(
        &self,
        Parameters(request): Parameters<CreateDirectoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::create_directory(&request.path) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Delete a single file. Refuses directories.")]
    pub async fn delete_file(
        &self,
        Parameters(request): Parameters<DeleteFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::delete_file(&request.path) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Delete a directory. Without recursive=true the directory must be empty.")]
    pub async fn delete_directory(
        &self,
        Parameters(request): Parameters<DeleteDirectoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let recursive = request.recursive.unwrap_or(false);
        match assistant_fsops::delete_directory(&request.path, recursive) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Copy a file, creating destination parent directories as needed.")]
    pub async fn copy_file(
        &self,
        Parameters(request): Parameters<TransferRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::copy_file(&request.source, &request.destination) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Recursively copy a directory. The destination must not exist yet.")]
    pub async fn copy_directory(
        &self,
        Parameters(request): Parameters<TransferRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::copy_directory(&request.source, &request.destination) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Move a file. Moving onto an existing directory moves the file into it.")]
    pub async fn move_file(
        &self,
        Parameters(request): Parameters<TransferRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::move_file(&request.source, &request.destination) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Move a directory. Moving onto an existing directory moves it inside.")]
    pub async fn move_directory(
        &self,
        Parameters(request): Parameters<TransferRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::move_directory(&request.source, &request.destination) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Rename a file in place. The new name is joined to the source's parent directory.")]
    pub async fn rename_file(
        &self,
        Parameters(request): Parameters<RenameRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::rename_file(&request.source, &request.new_name) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Rename a directory in place. The new name is joined to the source's parent directory.")]
    pub async fn rename_directory(
        &self,
        Parameters(request): Parameters<RenameRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::rename_directory(&request.source, &request.new_name) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Stat a path: size, timestamps, permissions, and extension.")]
    pub async fn get_file_info(
        &self,
        Parameters(request): Parameters<FileInfoRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::file_info(&request.path) {
            Ok(info) => ok_json(&info),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Search file contents with a regular expression under a directory. Returns matching lines with line numbers, grouped by file.")]
    pub async fn search_in_files(
        &self,
        Parameters(request): Parameters<SearchInFilesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let file_pattern = request.file_pattern.unwrap_or_else(|| "*.py".to_string());
        match assistant_fsops::search_in_files(&request.directory, &request.pattern, &file_pattern)
        {
            Ok(outcome) => ok_json(&outcome),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Find files by name pattern, recursively by default. Returns joined and directory-relative paths.")]
    pub async fn find_files(
        &self,
        Parameters(request): Parameters<FindFilesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let recursive = request.recursive.unwrap_or(true);
        match assistant_fsops::find_files(&request.directory, &request.pattern, recursive) {
            Ok(outcome) => ok_json(&outcome),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Create a new file, creating parent directories as needed. Reports whether the file already existed.")]
    pub async fn create_file(
        &self,
        Parameters(request): Parameters<CreateFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        let content = request.content.unwrap_or_default();
        match assistant_fsops::create_file(&request.file_path, &content) {
            Ok(created) => ok_json(&created),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Zip a directory. Defaults to <parent>/<dirname>.zip with entries rooted at the directory name.")]
    pub async fn zip_directory(
        &self,
        Parameters(request): Parameters<ZipDirectoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::zip_directory(&request.directory, request.output_path.as_deref()) {
            Ok(outcome) => ok_json(&outcome),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Extract a zip archive. Defaults to extracting into the archive's parent directory.")]
    pub async fn unzip_file(
        &self,
        Parameters(request): Parameters<UnzipFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::unzip_file(&request.zip_path, request.extract_to.as_deref()) {
            Ok(outcome) => ok_json(&outcome),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Create a temporary directory that persists until the caller removes it.")]
    pub async fn create_temp_directory(
        &self,
        Parameters(_request): Parameters<CreateTempDirectoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::create_temp_directory() {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Create a persistent temporary file with optional suffix, prefix, and parent directory.")]
    pub async fn create_temp_file(
        &self,
        Parameters(request): Parameters<CreateTempFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::create_temp_file(
            request.suffix.as_deref(),
            request.prefix.as_deref(),
            request.directory.as_deref(),
        ) {
            Ok(ack) => ok_json(&ack),
            Err(err) => fs_err(err),
        }
    }

    #[tool(description = "Create a README.md template for a project, or append an 'Updates Needed' section naming the given sections.")]
    pub async fn update_readme(
        &self,
        Parameters(request): Parameters<UpdateReadmeRequest>,
    ) -> Result<CallToolResult, McpError> {
        match assistant_fsops::update_readme(&request.project_dir, request.sections.as_deref()) {
            Ok(outcome) => ok_json(&outcome),
            Err(err) => fs_err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reply_body(result: &CallToolResult) -> serde_json::Value {
        let text = result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .unwrap_or_default();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn fs_errors_carry_kind_and_path() {
        let result = fs_err(FsError::not_found("File not found: x.py", "x.py")).unwrap();
        assert_eq!(result.is_error, Some(true));

        let body = reply_body(&result);
        assert_eq!(body["success"], false);
        assert_eq!(body["kind"], "not_found");
        assert_eq!(body["message"], "File not found: x.py");
        assert_eq!(body["path"], "x.py");
    }

    #[test]
    fn pattern_failures_map_to_parse_error_without_path() {
        let result = fs_err(FsError::invalid_pattern("unclosed group")).unwrap();
        let body = reply_body(&result);
        assert_eq!(body["kind"], "parse_error");
        assert!(body.get("path").is_none());
    }

    #[test]
    fn ambiguous_targets_map_to_the_ambiguous_kind() {
        let err = AnalysisError::AmbiguousTarget {
            name: "helper".to_string(),
            lines: vec![1, 9],
        };
        let result = analysis_err("util.py", err).unwrap();
        assert_eq!(result.is_error, Some(true));

        let body = reply_body(&result);
        assert_eq!(body["kind"], "ambiguous");
        assert_eq!(body["path"], "util.py");
        assert!(body["message"].as_str().unwrap().contains("helper"));
    }

    #[test]
    fn object_names_take_precedence_over_line_numbers() {
        assert_eq!(
            docstring_target(Some("run".to_string()), Some(10)),
            TargetQuery::ByName("run".to_string())
        );
        assert_eq!(docstring_target(None, Some(10)), TargetQuery::ByLine(10));
        assert_eq!(docstring_target(None, None), TargetQuery::FirstUndocumented);
    }

    #[test]
    fn enveloped_payloads_flatten_beside_the_success_flag() {
        #[derive(Serialize)]
        struct Payload {
            line_number: usize,
        }

        let result = ok_json(&Enveloped {
            success: true,
            payload: Payload { line_number: 3 },
        })
        .unwrap();
        assert_ne!(result.is_error, Some(true));

        let body = reply_body(&result);
        assert_eq!(body["success"], true);
        assert_eq!(body["line_number"], 3);
    }

    #[test]
    fn env_policy_parser_accepts_both_settings() {
        assert_eq!(
            SelectionPolicy::from_setting("first"),
            Some(SelectionPolicy::FirstMatch)
        );
        assert_eq!(
            SelectionPolicy::from_setting("ERROR"),
            Some(SelectionPolicy::Error)
        );
        assert_eq!(SelectionPolicy::from_setting("ask"), None);
    }
}
