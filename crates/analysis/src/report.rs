//! Structure report for a single source file.
//!
//! One pre-order pass over the syntax tree collects classes (anywhere in the
//! tree), module-level functions, per-symbol imports, and docstring coverage
//! over every documentable node.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::error::Result;
use crate::parse::parse_python;
use crate::visit::{self, Declaration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FunctionInfo {
    pub name: String,
    /// 1-based line of the `def` keyword, decorators excluded.
    pub line: usize,
    pub docstring: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassInfo {
    pub name: String,
    pub line: usize,
    /// Function definitions that are immediate children of the class body.
    pub methods: Vec<FunctionInfo>,
    pub docstring: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImportInfo {
    /// `import a.b` style; one entry per imported module path.
    Import { name: String },
    /// `from m import x` style; one entry per imported symbol, wildcard
    /// recorded as `*`. Relative modules keep their raw dotted text.
    From { module: String, name: String },
}

/// Everything the analyzer reports about one file. Pure data, no I/O
/// handles, comparable for equality in tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileAnalysisReport {
    pub file_path: String,
    pub line_count: usize,
    pub classes: Vec<ClassInfo>,
    pub functions: Vec<FunctionInfo>,
    pub imports: Vec<ImportInfo>,
    /// Percent of documentable nodes carrying a docstring, in [0, 100].
    pub docstring_coverage: f64,
    pub documentable_count: usize,
    pub documented_count: usize,
}

/// Analyze one file's text. The path is carried through to the report's
/// identity field only; no file I/O happens here.
pub fn analyze_source(file_path: &str, content: &str) -> Result<FileAnalysisReport> {
    let tree = parse_python(content)?;
    let root = tree.root_node();

    let mut classes = Vec::new();
    let mut functions = Vec::new();
    let mut imports = Vec::new();
    let mut documentable = 0usize;
    let mut documented = 0usize;

    visit::walk_preorder(root, &mut |node| {
        let Some(decl) = visit::classify(node) else {
            return;
        };
        match decl {
            Declaration::Module(module) => {
                documentable += 1;
                if visit::docstring(module, content).is_some() {
                    documented += 1;
                }
            }
            Declaration::Class(class_node) => {
                documentable += 1;
                let docstring = visit::docstring(class_node, content);
                if docstring.is_some() {
                    documented += 1;
                }
                let methods = visit::class_method_nodes(class_node)
                    .into_iter()
                    .filter_map(|method| function_info(method, content))
                    .collect();
                if let Some(name) = visit::declaration_name(class_node, content) {
                    classes.push(ClassInfo {
                        name,
                        line: visit::line_of(class_node),
                        methods,
                        docstring,
                    });
                }
            }
            Declaration::Function(func) => {
                documentable += 1;
                if visit::docstring(func, content).is_some() {
                    documented += 1;
                }
                if is_module_level(func) {
                    if let Some(info) = function_info(func, content) {
                        functions.push(info);
                    }
                }
            }
            Declaration::Import(import) => imports.extend(expand_import(import, content)),
        }
    });

    let docstring_coverage = if documentable > 0 {
        documented as f64 / documentable as f64 * 100.0
    } else {
        0.0
    };

    Ok(FileAnalysisReport {
        file_path: file_path.to_string(),
        line_count: content.lines().count(),
        classes,
        functions,
        imports,
        docstring_coverage,
        documentable_count: documentable,
        documented_count: documented,
    })
}

fn function_info(node: Node<'_>, source: &str) -> Option<FunctionInfo> {
    let name = visit::declaration_name(node, source)?;
    Some(FunctionInfo {
        name,
        line: visit::line_of(node),
        docstring: visit::docstring(node, source),
    })
}

/// Structural zero-nesting test: the definition (or its decorator wrapper)
/// sits directly under the module node. Functions inside classes, other
/// functions, or module-level conditional blocks are all excluded.
fn is_module_level(node: Node<'_>) -> bool {
    let mut parent = node.parent();
    while let Some(candidate) = parent {
        match candidate.kind() {
            "decorated_definition" => parent = candidate.parent(),
            "module" => return true,
            _ => return false,
        }
    }
    false
}

fn expand_import(node: Node<'_>, source: &str) -> Vec<ImportInfo> {
    match node.kind() {
        "import_statement" => {
            let mut cursor = node.walk();
            node.children_by_field_name("name", &mut cursor)
                .map(|child| ImportInfo::Import {
                    name: imported_symbol_text(child, source),
                })
                .collect()
        }
        "import_from_statement" | "future_import_statement" => {
            let module = match node.child_by_field_name("module_name") {
                Some(name) => source[name.byte_range()].to_string(),
                // The future form spells its module as a bare keyword.
                None => "__future__".to_string(),
            };

            let mut cursor = node.walk();
            let wildcard = node
                .children(&mut cursor)
                .any(|child| child.kind() == "wildcard_import");
            if wildcard {
                return vec![ImportInfo::From {
                    module,
                    name: "*".to_string(),
                }];
            }

            let mut cursor = node.walk();
            node.children_by_field_name("name", &mut cursor)
                .map(|child| ImportInfo::From {
                    module: module.clone(),
                    name: imported_symbol_text(child, source),
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Real name of an imported entry; aliases (`as x`) are dropped in favor of
/// the original symbol.
fn imported_symbol_text(node: Node<'_>, source: &str) -> String {
    let target = match node.kind() {
        "aliased_import" => node.child_by_field_name("name").unwrap_or(node),
        _ => node,
    };
    source[target.byte_range()].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#""""Top module doc."""
import os, sys
from collections import OrderedDict, defaultdict

class Shape:
    """A documented class."""

    def area(self):
        """Documented method."""
        return 0

    def perimeter(self):
        return 0

def top_level():
    """Documented function."""
    def inner():
        pass
    return inner
"#;

    #[test]
    fn report_collects_classes_functions_imports() {
        let report = analyze_source("fixture.py", FIXTURE).unwrap();

        assert_eq!(report.file_path, "fixture.py");
        assert_eq!(report.classes.len(), 1);
        assert_eq!(report.classes[0].name, "Shape");
        assert_eq!(report.classes[0].methods.len(), 2);
        assert_eq!(report.classes[0].methods[0].name, "area");
        assert_eq!(report.classes[0].methods[1].name, "perimeter");
        assert_eq!(report.classes[0].methods[1].docstring, None);

        // inner() is nested, so only one top-level function.
        assert_eq!(report.functions.len(), 1);
        assert_eq!(report.functions[0].name, "top_level");

        assert_eq!(
            report.imports,
            vec![
                ImportInfo::Import {
                    name: "os".to_string()
                },
                ImportInfo::Import {
                    name: "sys".to_string()
                },
                ImportInfo::From {
                    module: "collections".to_string(),
                    name: "OrderedDict".to_string()
                },
                ImportInfo::From {
                    module: "collections".to_string(),
                    name: "defaultdict".to_string()
                },
            ]
        );
    }

    #[test]
    fn coverage_counts_every_documentable_node() {
        let report = analyze_source("fixture.py", FIXTURE).unwrap();

        // module + class + 2 methods + top_level + inner
        assert_eq!(report.documentable_count, 6);
        // module, class, area, top_level
        assert_eq!(report.documented_count, 4);
        let expected = 4.0 / 6.0 * 100.0;
        assert!((report.docstring_coverage - expected).abs() < 1e-9);
    }

    #[test]
    fn analysis_is_deterministic() {
        let first = analyze_source("fixture.py", FIXTURE).unwrap();
        let second = analyze_source("fixture.py", FIXTURE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn one_class_two_methods_one_documented() {
        let source = "\
class Shape:
    def area(self):
        \"\"\"Area.\"\"\"
        return 0

    def perimeter(self):
        return 0
";
        let report = analyze_source("shapes.py", source).unwrap();
        assert_eq!(report.classes.len(), 1);
        assert_eq!(report.classes[0].methods.len(), 2);
        assert!(report.functions.is_empty());
        // module + class + 2 methods documentable, one method documented
        assert_eq!(report.documentable_count, 4);
        assert_eq!(report.documented_count, 1);
        assert!((report.docstring_coverage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn coverage_is_zero_without_documentation() {
        let report = analyze_source("empty.py", "x = 1\n").unwrap();
        assert_eq!(report.documented_count, 0);
        assert_eq!(report.docstring_coverage, 0.0);
    }

    #[test]
    fn coverage_is_hundred_when_everything_documented() {
        let source = "\
\"\"\"Module.\"\"\"

class C:
    \"\"\"Class.\"\"\"

    def m(self):
        \"\"\"Method.\"\"\"
";
        let report = analyze_source("full.py", source).unwrap();
        assert_eq!(report.docstring_coverage, 100.0);
    }

    #[test]
    fn functions_in_conditional_blocks_are_not_top_level() {
        let source = "\
if True:
    def guarded():
        pass

def free():
    pass
";
        let report = analyze_source("cond.py", source).unwrap();
        let names: Vec<&str> = report.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["free"]);
        // guarded still counts toward coverage
        assert_eq!(report.documentable_count, 3);
    }

    #[test]
    fn decorated_and_async_definitions_are_included() {
        let source = "\
@wrap
def decorated():
    pass

async def fetch():
    pass
";
        let report = analyze_source("defs.py", source).unwrap();
        let names: Vec<&str> = report.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["decorated", "fetch"]);
        assert_eq!(report.functions[0].line, 2);
    }

    #[test]
    fn nested_classes_are_reported() {
        let source = "\
class Outer:
    class Inner:
        def m(self):
            pass
";
        let report = analyze_source("nested.py", source).unwrap();
        let names: Vec<&str> = report.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Outer", "Inner"]);
        assert_eq!(report.classes[1].methods.len(), 1);
    }

    #[test]
    fn wildcard_future_and_relative_imports() {
        let source = "\
from __future__ import annotations
from os.path import *
from .sibling import helper
";
        let report = analyze_source("imports.py", source).unwrap();
        assert_eq!(
            report.imports,
            vec![
                ImportInfo::From {
                    module: "__future__".to_string(),
                    name: "annotations".to_string()
                },
                ImportInfo::From {
                    module: "os.path".to_string(),
                    name: "*".to_string()
                },
                ImportInfo::From {
                    module: ".sibling".to_string(),
                    name: "helper".to_string()
                },
            ]
        );
    }

    #[test]
    fn aliased_imports_record_the_original_name() {
        let source = "import numpy as np\nfrom os import path as p\n";
        let report = analyze_source("alias.py", source).unwrap();
        assert_eq!(
            report.imports,
            vec![
                ImportInfo::Import {
                    name: "numpy".to_string()
                },
                ImportInfo::From {
                    module: "os".to_string(),
                    name: "path".to_string()
                },
            ]
        );
    }

    #[test]
    fn report_serializes_with_wire_field_names() {
        let report = analyze_source("wire.py", "import os\n\ndef f():\n    pass\n").unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["imports"][0]["type"], "import");
        assert_eq!(value["imports"][0]["name"], "os");
        assert_eq!(value["functions"][0]["line"], 3);
        // absent docstrings serialize as explicit null
        assert!(value["functions"][0]["docstring"].is_null());
    }

    #[test]
    fn syntax_errors_surface_as_parse_errors() {
        let err = analyze_source("broken.py", "def broken(:\n").unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }
}
