//! The four menu workflows, each a fixed tool-call plan plus one model
//! request.
//!
//! Tool failures are handled per workflow: a project report keeps going when
//! one file fails to analyze, a docstring pass skips targets the server
//! cannot resolve, and everything else propagates.

use std::path::Path;

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use serde_json::json;

use assistant_analysis::{DocstringSuggestion, FileAnalysisReport};
use assistant_protocol::types::{CreateFileResult, FileContent, FileInfoResult, FileList, OpAck};
use assistant_protocol::ErrorKind;

use crate::ai::ModelClient;
use crate::prompts::{self, FileKind};
use crate::session::{AssistantSession, SessionError};

/// Token cap for reports and per-file suggestions.
const REPORT_MAX_TOKENS: u32 = 2000;
/// Whole-file rewrites and fresh files get more room.
const REWRITE_MAX_TOKENS: u32 = 4000;

/// One docstring handed to the model for integration.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestedDocstring {
    /// Methods are qualified as `Class.method`.
    pub name: String,
    pub docstring: String,
}

/// Result of the docstring workflow.
#[derive(Debug)]
pub enum DocstringOutcome {
    /// Every documentable item already carries a docstring.
    AlreadyDocumented,
    /// Undocumented items existed but no suggestion could be generated.
    NothingGenerated,
    /// The file was rewritten with the listed docstrings.
    Updated { items: Vec<SuggestedDocstring> },
}

#[derive(Debug)]
pub struct GeneratedFile {
    pub path: String,
    pub language: &'static str,
}

pub struct Assistant {
    session: AssistantSession,
    model: ModelClient,
    max_files: usize,
}

impl Assistant {
    pub async fn connect(server: &str, model: ModelClient, max_files: usize) -> Result<Self> {
        let session = AssistantSession::connect(server).await?;
        Ok(Self {
            session,
            model,
            max_files,
        })
    }

    pub async fn tool_names(&self) -> Result<Vec<String>> {
        self.session.tool_names().await
    }

    pub async fn shutdown(self) -> Result<()> {
        self.session.shutdown().await
    }

    async fn generate(&self, prompt: String, max_tokens: u32) -> Result<String> {
        let client = self.model.clone();
        Ok(
            tokio::task::spawn_blocking(move || client.generate(&prompt, max_tokens))
                .await
                .map_err(|err| anyhow!("join model request task: {err}"))??,
        )
    }

    /// Project report: tree plus the first analyses, summarized by the
    /// model. Files the analyzer rejects are reported as their failure
    /// records instead of aborting the batch.
    pub async fn analyze_project(&self, project_dir: &str) -> Result<String> {
        let tree = self
            .session
            .call("get_project_tree", json!({ "directory": project_dir }))
            .await?;
        let files: FileList = self
            .session
            .call_as(
                "list_files",
                json!({ "directory": project_dir, "pattern": "**/*.py" }),
            )
            .await?;

        let mut analyses = Vec::new();
        for file_path in files.files.iter().take(self.max_files) {
            match self
                .session
                .call("analyze_code", json!({ "file_path": file_path }))
                .await
            {
                Ok(report) => analyses.push(report),
                Err(SessionError::Tool(failure)) => analyses.push(serde_json::to_value(&failure)?),
                Err(err) => return Err(err.into()),
            }
        }

        let context = json!({
            "project_structure": tree,
            "file_analyses": analyses,
        });
        let prompt = prompts::project_report(&context);
        self.generate(prompt, REPORT_MAX_TOKENS).await
    }

    /// Improvement suggestions for one file.
    pub async fn improve_file(&self, file_path: &str) -> Result<String> {
        let file: FileContent = self
            .session
            .call_as("get_file", json!({ "file_path": file_path }))
            .await?;
        let analysis = self
            .session
            .call("analyze_code", json!({ "file_path": file_path }))
            .await?;

        let prompt = prompts::file_improvements(file_path, &file.content, &analysis);
        self.generate(prompt, REPORT_MAX_TOKENS).await
    }

    /// Generate docstrings for every undocumented declaration and have the
    /// model weave them into the file.
    pub async fn update_docstrings(&self, file_path: &str) -> Result<DocstringOutcome> {
        let report: FileAnalysisReport = self
            .session
            .call_as("analyze_code", json!({ "file_path": file_path }))
            .await?;
        let targets = undocumented_items(&report);
        if targets.is_empty() {
            return Ok(DocstringOutcome::AlreadyDocumented);
        }

        let original: FileContent = self
            .session
            .call_as("get_file", json!({ "file_path": file_path }))
            .await?;

        let mut items = Vec::new();
        for target in &targets {
            let args = json!({
                "file_path": file_path,
                "object_name": target.lookup,
                "line_number": target.line,
            });
            match self
                .session
                .call_as::<DocstringSuggestion>("generate_docstring", args)
                .await
            {
                Ok(suggestion) => items.push(SuggestedDocstring {
                    name: target.qualified.clone(),
                    docstring: suggestion.suggested_docstring,
                }),
                Err(SessionError::Tool(failure)) => {
                    log::warn!("skipping {}: {}", target.qualified, failure.message);
                }
                Err(err) => return Err(err.into()),
            }
        }
        if items.is_empty() {
            return Ok(DocstringOutcome::NothingGenerated);
        }

        let prompt =
            prompts::docstring_integration(&original.content, &serde_json::to_value(&items)?);
        let reply = self.generate(prompt, REWRITE_MAX_TOKENS).await?;
        let updated = strip_code_fence(&reply);

        let _: OpAck = self
            .session
            .call_as(
                "update_file",
                json!({ "file_path": file_path, "content": updated }),
            )
            .await?;
        Ok(DocstringOutcome::Updated { items })
    }

    /// Generate a new file from a description, refusing to overwrite.
    pub async fn generate_file(
        &self,
        project_dir: &str,
        relative_path: &str,
        description: &str,
    ) -> Result<GeneratedFile> {
        let tree = self
            .session
            .call("get_project_tree", json!({ "directory": project_dir }))
            .await?;

        let target = Path::new(project_dir).join(relative_path);
        let target_path = target.to_string_lossy().into_owned();
        match self
            .session
            .call_as::<FileInfoResult>("get_file_info", json!({ "path": target_path }))
            .await
        {
            Ok(_) => bail!("{relative_path} already exists; refusing to overwrite"),
            Err(SessionError::Tool(failure)) if failure.kind == ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        let prompt = prompts::new_file(relative_path, description, &tree);
        let reply = self.generate(prompt, REWRITE_MAX_TOKENS).await?;
        let content = strip_code_fence(&reply);

        let created: CreateFileResult = self
            .session
            .call_as(
                "create_file",
                json!({ "file_path": target_path, "content": content }),
            )
            .await?;
        Ok(GeneratedFile {
            path: created.path,
            language: FileKind::from_path(relative_path).label(),
        })
    }
}

/// An undocumented declaration to request a docstring for.
#[derive(Debug, Clone, PartialEq)]
struct DocTarget {
    /// Display name; methods carry their class prefix.
    qualified: String,
    /// Name sent to the server, the last path component.
    lookup: String,
    line: usize,
}

/// Report order: module-level functions first, then each class followed by
/// its own methods. The module docstring is not a target here.
fn undocumented_items(report: &FileAnalysisReport) -> Vec<DocTarget> {
    let mut targets = Vec::new();
    for function in &report.functions {
        if function.docstring.is_none() {
            targets.push(DocTarget {
                qualified: function.name.clone(),
                lookup: function.name.clone(),
                line: function.line,
            });
        }
    }
    for class in &report.classes {
        if class.docstring.is_none() {
            targets.push(DocTarget {
                qualified: class.name.clone(),
                lookup: class.name.clone(),
                line: class.line,
            });
        }
        for method in &class.methods {
            if method.docstring.is_none() {
                targets.push(DocTarget {
                    qualified: format!("{}.{}", class.name, method.name),
                    lookup: method.name.clone(),
                    line: method.line,
                });
            }
        }
    }
    targets
}

/// Model replies usually wrap file content in one fenced block. Returns the
/// first fence's body, or the reply unchanged when no complete fence exists.
fn strip_code_fence(reply: &str) -> String {
    let Some(open) = reply.find("```") else {
        return reply.to_string();
    };
    let tail = &reply[open + 3..];
    let Some(tag_end) = tail.find('\n') else {
        return reply.to_string();
    };
    let body = &tail[tag_end + 1..];
    let Some(close) = body.find("```") else {
        return reply.to_string();
    };
    let inner = &body[..close];
    inner.strip_suffix('\n').unwrap_or(inner).to_string()
}
