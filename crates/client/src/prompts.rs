//! Prompt builders for the menu workflows.
//!
//! Context records are embedded pretty-printed so the model sees the same
//! JSON a human would read in the terminal.

use serde_json::Value;
use std::path::Path;

/// Prompt family for a generated file, keyed on its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Python,
    Script,
    Web,
    Plain,
}

impl FileKind {
    pub fn from_path(path: &str) -> Self {
        let extension = Path::new(path)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());
        match extension.as_deref() {
            Some("py") => FileKind::Python,
            Some("js") | Some("ts") => FileKind::Script,
            Some("html") | Some("css") => FileKind::Web,
            _ => FileKind::Plain,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Python => "Python",
            FileKind::Script => "JavaScript/TypeScript",
            FileKind::Web => "HTML/CSS",
            FileKind::Plain => "text",
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Whole-project report request over the tree and per-file analyses.
pub fn project_report(context: &Value) -> String {
    format!(
        r#"You are an expert Python developer. Analyze the following project data and write a detailed report covering:

1. Overall project structure
2. Code quality (docstring coverage, apparent complexity)
3. Improvement recommendations
4. General assessment

Analysis data:
{}"#,
        pretty(context)
    )
}

/// Improvement suggestions for one file, its content and analysis attached.
pub fn file_improvements(file_path: &str, content: &str, analysis: &Value) -> String {
    format!(
        r#"You are an expert Python developer. Suggest improvements for this code.

File: {file_path}

Content:
```python
{content}
```

Analysis:
{}

Propose concrete improvements covering:
1. Readability
2. Performance
3. Python best practices
4. Documentation

Where possible, include an improved version of the code."#,
        pretty(analysis)
    )
}

/// Ask for the file rewritten with the listed docstrings inserted.
pub fn docstring_integration(content: &str, suggestions: &Value) -> String {
    format!(
        r#"Add docstrings to the following Python code.

Original code:
```python
{content}
```

Docstrings to add:
{}

Return only the updated code with the docstrings inserted at the right places. Do not add comments or explanations."#,
        pretty(suggestions)
    )
}

/// New-file generation request, worded per the target extension.
pub fn new_file(path: &str, description: &str, tree: &Value) -> String {
    let extension = Path::new(path)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default();
    let structure = pretty(tree);

    match FileKind::from_path(path) {
        FileKind::Python => format!(
            r#"You are an expert Python developer. Generate a Python file from this description:

Description: {description}

Project structure:
{structure}

Make sure the code:
1. Follows PEP 8
2. Includes complete docstrings
3. Handles errors properly
4. Is well structured and modular

Return only the Python code without explanations."#
        ),
        FileKind::Script => format!(
            r#"You are an expert JavaScript/TypeScript developer. Generate a {extension} file from this description:

Description: {description}

Project structure:
{structure}

Make sure the code:
1. Follows modern best practices
2. Is well documented
3. Handles errors properly
4. Is well structured

Return only the code without explanations."#
        ),
        FileKind::Web => format!(
            r#"You are an expert web developer. Generate a {extension} file from this description:

Description: {description}

Project structure:
{structure}

Make sure the code:
1. Is valid and standards compliant
2. Is responsive where applicable
3. Is well documented with comments
4. Uses modern practices

Return only the code without explanations."#
        ),
        FileKind::Plain => format!(
            r#"Generate a text file from this description:

Description: {description}

Project structure:
{structure}

Return only the file content without explanations."#
        ),
    }
}
