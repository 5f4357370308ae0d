//! # Assistant Code Analysis
//!
//! AST-backed structure reports and docstring templating for Python sources.
//!
//! ## Philosophy
//!
//! The analyzer is handed text, never a path, so it:
//! - Performs no file I/O and no execution of the analyzed source
//! - Produces pure data that callers can serialize or diff
//! - Converts every parse failure into a typed error, so a batch over many
//!   files survives one bad file
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     │
//!     ├──> Grammar Load + Parse → Syntax Tree (invalid syntax rejected)
//!     │
//!     ├──> Pre-order Walk
//!     │    ├─> Classes (whole tree) with their direct methods
//!     │    ├─> Module-level functions (structural zero-nesting test)
//!     │    ├─> Imports, one entry per imported symbol
//!     │    └─> Docstring coverage counters
//!     │
//!     └──> FileAnalysisReport / DocstringSuggestion
//! ```
//!
//! ## Example
//!
//! ```rust
//! use assistant_analysis::analyze_source;
//!
//! let source = "def greet(name):\n    return name\n";
//! let report = analyze_source("greet.py", source).unwrap();
//!
//! assert_eq!(report.functions[0].name, "greet");
//! assert_eq!(report.docstring_coverage, 0.0);
//! ```

mod docstring;
mod error;
mod language;
mod parse;
mod report;
mod visit;

pub use docstring::{
    suggest_docstring, DocstringSuggestion, SelectionPolicy, TargetKind, TargetQuery,
};
pub use error::{AnalysisError, Result};
pub use language::SourceLanguage;
pub use report::{analyze_source, ClassInfo, FileAnalysisReport, FunctionInfo, ImportInfo};
