//! Templated docstring suggestions for undocumented declarations.
//!
//! This is template filling, not generation: the body of the target is never
//! inspected, and callers are expected to hand the template to something
//! smarter for refinement.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::error::{AnalysisError, Result};
use crate::parse::parse_python;
use crate::visit;

/// How a caller points at the declaration to document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetQuery {
    /// First class or function with this exact name, scan order pre-order.
    ByName(String),
    /// First class or function whose `def`/`class` keyword sits on this
    /// 1-based line.
    ByLine(usize),
    /// First documentable node (module included) without a docstring.
    FirstUndocumented,
}

/// What to do when a name query matches more than one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Take the earliest match in source order.
    #[default]
    FirstMatch,
    /// Refuse with the full list of candidate lines.
    Error,
}

impl SelectionPolicy {
    /// Parse a configuration value. Accepts `first` and `error`, case
    /// insensitive.
    pub fn from_setting(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" => Some(Self::FirstMatch),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Function,
    Class,
    Module,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocstringSuggestion {
    pub node_type: TargetKind,
    /// Absent for module targets; the module is named by its file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub suggested_docstring: String,
    pub line_number: usize,
}

/// Resolve a target in `content` per the query and build its template. The
/// path only feeds the module template's title line.
pub fn suggest_docstring(
    file_path: &str,
    content: &str,
    query: &TargetQuery,
    policy: SelectionPolicy,
) -> Result<DocstringSuggestion> {
    let tree = parse_python(content)?;
    let root = tree.root_node();

    match query {
        TargetQuery::ByName(name) => {
            let candidates = named_declarations(root, content, name);
            match candidates.as_slice() {
                [] => Err(AnalysisError::NoTarget),
                [only] => Ok(suggestion_for(*only, file_path, content)),
                [first, ..] => match policy {
                    SelectionPolicy::FirstMatch => Ok(suggestion_for(*first, file_path, content)),
                    SelectionPolicy::Error => Err(AnalysisError::AmbiguousTarget {
                        name: name.clone(),
                        lines: candidates.iter().map(|n| visit::line_of(*n)).collect(),
                    }),
                },
            }
        }
        TargetQuery::ByLine(line) => declaration_at_line(root, *line)
            .map(|node| suggestion_for(node, file_path, content))
            .ok_or(AnalysisError::NoTarget),
        TargetQuery::FirstUndocumented => first_undocumented(root, content)
            .map(|node| suggestion_for(node, file_path, content))
            .ok_or(AnalysisError::NoTarget),
    }
}

fn named_declarations<'t>(root: Node<'t>, source: &str, name: &str) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    visit::walk_preorder(root, &mut |node| {
        if matches!(node.kind(), "class_definition" | "function_definition")
            && visit::declaration_name(node, source).as_deref() == Some(name)
        {
            found.push(node);
        }
    });
    found
}

fn declaration_at_line(root: Node<'_>, line: usize) -> Option<Node<'_>> {
    let mut found = None;
    visit::walk_preorder(root, &mut |node| {
        if found.is_none()
            && matches!(node.kind(), "class_definition" | "function_definition")
            && visit::line_of(node) == line
        {
            found = Some(node);
        }
    });
    found
}

fn first_undocumented<'t>(root: Node<'t>, source: &str) -> Option<Node<'t>> {
    let mut found = None;
    visit::walk_preorder(root, &mut |node| {
        if found.is_some() {
            return;
        }
        if matches!(
            node.kind(),
            "module" | "class_definition" | "function_definition"
        ) && visit::docstring(node, source).is_none()
        {
            found = Some(node);
        }
    });
    found
}

fn suggestion_for(node: Node<'_>, file_path: &str, source: &str) -> DocstringSuggestion {
    match node.kind() {
        "function_definition" => {
            let name = visit::declaration_name(node, source).unwrap_or_default();
            let params = parameter_names(node, source);
            let suggested_docstring = function_template(&name, &params);
            DocstringSuggestion {
                node_type: TargetKind::Function,
                name: Some(name),
                suggested_docstring,
                line_number: visit::line_of(node),
            }
        }
        "class_definition" => {
            let name = visit::declaration_name(node, source).unwrap_or_default();
            let suggested_docstring = class_template(&name);
            DocstringSuggestion {
                node_type: TargetKind::Class,
                name: Some(name),
                suggested_docstring,
                line_number: visit::line_of(node),
            }
        }
        _ => DocstringSuggestion {
            node_type: TargetKind::Module,
            name: None,
            suggested_docstring: module_template(file_path),
            line_number: 1,
        },
    }
}

/// Named parameters of a function, keyword-only included, `self` and the
/// splat forms (`*args`, `**kwargs`) excluded.
fn parameter_names(node: Node<'_>, source: &str) -> Vec<String> {
    let Some(params) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut cursor = params.walk();
    let mut names = Vec::new();
    for child in params.named_children(&mut cursor) {
        let ident = match child.kind() {
            "identifier" => Some(child),
            "default_parameter" | "typed_default_parameter" => child.child_by_field_name("name"),
            "typed_parameter" => child.named_child(0).filter(|n| n.kind() == "identifier"),
            _ => None,
        };
        if let Some(ident) = ident {
            let text = &source[ident.byte_range()];
            if text != "self" {
                names.push(text.to_string());
            }
        }
    }
    names
}

fn function_template(name: &str, params: &[String]) -> String {
    let mut doc = format!("\"\"\"\n{name}\n\n");
    if !params.is_empty() {
        doc.push_str("Args:\n");
        for param in params {
            doc.push_str(&format!("    {param}: Description of {param}\n"));
        }
    }
    doc.push_str("\nReturns:\n    Description of return value\n\"\"\"");
    doc
}

fn class_template(name: &str) -> String {
    format!("\"\"\"\n{name} class\n\nDescription of the class and its purpose.\n\"\"\"")
}

fn module_template(file_path: &str) -> String {
    let base = std::path::Path::new(file_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());
    format!("\"\"\"\n{base}\n\nDescription of the module and its purpose.\n\"\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_parameter_function_has_no_args_section() {
        let source = "def ping():\n    pass\n";
        let suggestion = suggest_docstring(
            "net.py",
            source,
            &TargetQuery::ByName("ping".to_string()),
            SelectionPolicy::FirstMatch,
        )
        .unwrap();

        assert_eq!(suggestion.node_type, TargetKind::Function);
        assert_eq!(suggestion.name.as_deref(), Some("ping"));
        assert_eq!(suggestion.line_number, 1);
        assert_eq!(
            suggestion.suggested_docstring,
            "\"\"\"\nping\n\n\nReturns:\n    Description of return value\n\"\"\""
        );
    }

    #[test]
    fn parameters_skip_self_and_splats_keep_keyword_only() {
        let source = "\
class C:
    def m(self, a, b: int, c=1, *args, d, **kwargs):
        pass
";
        let suggestion = suggest_docstring(
            "c.py",
            source,
            &TargetQuery::ByName("m".to_string()),
            SelectionPolicy::FirstMatch,
        )
        .unwrap();

        assert_eq!(
            suggestion.suggested_docstring,
            "\"\"\"\nm\n\nArgs:\n    a: Description of a\n    b: Description of b\n    \
             c: Description of c\n    d: Description of d\n\nReturns:\n    \
             Description of return value\n\"\"\""
        );
    }

    #[test]
    fn class_target_uses_class_template() {
        let source = "class Widget:\n    pass\n";
        let suggestion = suggest_docstring(
            "w.py",
            source,
            &TargetQuery::ByName("Widget".to_string()),
            SelectionPolicy::FirstMatch,
        )
        .unwrap();

        assert_eq!(suggestion.node_type, TargetKind::Class);
        assert_eq!(
            suggestion.suggested_docstring,
            "\"\"\"\nWidget class\n\nDescription of the class and its purpose.\n\"\"\""
        );
    }

    #[test]
    fn line_lookup_matches_the_def_line() {
        let source = "x = 1\n\ndef later():\n    pass\n";
        let suggestion = suggest_docstring(
            "l.py",
            source,
            &TargetQuery::ByLine(3),
            SelectionPolicy::FirstMatch,
        )
        .unwrap();
        assert_eq!(suggestion.name.as_deref(), Some("later"));

        let miss = suggest_docstring(
            "l.py",
            source,
            &TargetQuery::ByLine(2),
            SelectionPolicy::FirstMatch,
        );
        assert!(matches!(miss, Err(AnalysisError::NoTarget)));
    }

    #[test]
    fn first_undocumented_prefers_the_module() {
        let source = "def f():\n    \"\"\"Doc.\"\"\"\n";
        let suggestion = suggest_docstring(
            "pkg/mod.py",
            source,
            &TargetQuery::FirstUndocumented,
            SelectionPolicy::FirstMatch,
        )
        .unwrap();

        assert_eq!(suggestion.node_type, TargetKind::Module);
        assert_eq!(suggestion.name, None);
        assert_eq!(suggestion.line_number, 1);
        assert_eq!(
            suggestion.suggested_docstring,
            "\"\"\"\nmod.py\n\nDescription of the module and its purpose.\n\"\"\""
        );
    }

    #[test]
    fn first_undocumented_scans_past_documented_nodes() {
        let source = "\
\"\"\"Module doc.\"\"\"

def documented():
    \"\"\"Has one.\"\"\"

def bare():
    pass
";
        let suggestion = suggest_docstring(
            "scan.py",
            source,
            &TargetQuery::FirstUndocumented,
            SelectionPolicy::FirstMatch,
        )
        .unwrap();
        assert_eq!(suggestion.name.as_deref(), Some("bare"));
    }

    #[test]
    fn fully_documented_file_yields_no_target() {
        let source = "\"\"\"Module doc.\"\"\"\n";
        let result = suggest_docstring(
            "done.py",
            source,
            &TargetQuery::FirstUndocumented,
            SelectionPolicy::FirstMatch,
        );
        assert!(matches!(result, Err(AnalysisError::NoTarget)));
    }

    #[test]
    fn ambiguous_names_follow_the_policy() {
        let source = "\
def dup():
    pass

class Holder:
    def dup(self):
        pass
";
        let query = TargetQuery::ByName("dup".to_string());

        let first = suggest_docstring("a.py", source, &query, SelectionPolicy::FirstMatch).unwrap();
        assert_eq!(first.line_number, 1);

        let err = suggest_docstring("a.py", source, &query, SelectionPolicy::Error).unwrap_err();
        match err {
            AnalysisError::AmbiguousTarget { name, lines } => {
                assert_eq!(name, "dup");
                assert_eq!(lines, vec![1, 5]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn unknown_name_yields_no_target() {
        let result = suggest_docstring(
            "a.py",
            "def f():\n    pass\n",
            &TargetQuery::ByName("missing".to_string()),
            SelectionPolicy::FirstMatch,
        );
        assert!(matches!(result, Err(AnalysisError::NoTarget)));
    }

    #[test]
    fn policy_settings_parse() {
        assert_eq!(
            SelectionPolicy::from_setting("first"),
            Some(SelectionPolicy::FirstMatch)
        );
        assert_eq!(
            SelectionPolicy::from_setting(" ERROR "),
            Some(SelectionPolicy::Error)
        );
        assert_eq!(SelectionPolicy::from_setting("maybe"), None);
    }

    #[test]
    fn suggestion_serializes_without_null_name() {
        let source = "x = 1\n";
        let suggestion = suggest_docstring(
            "m.py",
            source,
            &TargetQuery::FirstUndocumented,
            SelectionPolicy::FirstMatch,
        )
        .unwrap();

        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(value["node_type"], "module");
        assert!(value.get("name").is_none());
        assert_eq!(value["line_number"], 1);
    }
}
