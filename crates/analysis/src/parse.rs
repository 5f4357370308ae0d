use tree_sitter::{Node, Parser, Tree};

use crate::error::{AnalysisError, Result};
use crate::language::SourceLanguage;

/// Parse Python source into a syntax tree. Invalid syntax is reported as an
/// error value so batch callers can skip the file and keep going.
pub(crate) fn parse_python(content: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    let language = SourceLanguage::Python.tree_sitter_language();
    parser
        .set_language(&language)
        .map_err(|e| AnalysisError::parse(format!("failed to load python grammar: {e}")))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| AnalysisError::parse("parser produced no syntax tree"))?;

    if let Some(line) = first_syntax_error_line(tree.root_node()) {
        log::debug!("rejecting source with syntax error at line {line}");
        return Err(AnalysisError::parse(format!("invalid syntax at line {line}")));
    }
    Ok(tree)
}

/// Line (1-based) of the first error or missing node, if any.
fn first_syntax_error_line(node: Node<'_>) -> Option<usize> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(line) = first_syntax_error_line(child) {
            return Some(line);
        }
    }
    Some(node.start_position().row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_source() {
        let tree = parse_python("x = 1\n").unwrap();
        assert_eq!(tree.root_node().kind(), "module");
    }

    #[test]
    fn empty_source_is_valid() {
        assert!(parse_python("").is_ok());
    }

    #[test]
    fn rejects_invalid_syntax_with_line() {
        let err = parse_python("def broken(:\n    pass\n").unwrap_err();
        match err {
            AnalysisError::ParseError(msg) => assert!(msg.contains("line 1"), "{msg}"),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn reports_first_error_line_in_later_code() {
        let source = "def ok():\n    pass\n\nclass Bad(:\n    pass\n";
        let err = parse_python(source).unwrap_err();
        match err {
            AnalysisError::ParseError(msg) => assert!(msg.contains("line 4"), "{msg}"),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }
}
