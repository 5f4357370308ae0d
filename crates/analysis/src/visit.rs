use tree_sitter::Node;

/// Closed set of declaration kinds recognized by the tree walk. Every other
/// node kind is descended through without classification, so adding a new
/// declaration kind forces every consumer match to be revisited.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Declaration<'t> {
    Module(Node<'t>),
    Class(Node<'t>),
    Function(Node<'t>),
    Import(Node<'t>),
}

pub(crate) fn classify(node: Node<'_>) -> Option<Declaration<'_>> {
    match node.kind() {
        "module" => Some(Declaration::Module(node)),
        "class_definition" => Some(Declaration::Class(node)),
        "function_definition" => Some(Declaration::Function(node)),
        "import_statement" | "import_from_statement" | "future_import_statement" => {
            Some(Declaration::Import(node))
        }
        _ => None,
    }
}

/// Pre-order depth-first walk over every node in the tree.
pub(crate) fn walk_preorder<'t>(node: Node<'t>, visit: &mut impl FnMut(Node<'t>)) {
    visit(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_preorder(child, visit);
    }
}

/// 1-based source line of a node.
pub(crate) fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Identifier under the `name` field of a class or function definition.
pub(crate) fn declaration_name(node: Node<'_>, source: &str) -> Option<String> {
    let name = node.child_by_field_name("name")?;
    Some(source[name.byte_range()].to_string())
}

/// Function definitions that are immediate children of a class body, in
/// source order. Decorated definitions count as their inner function.
pub(crate) fn class_method_nodes(class_node: Node<'_>) -> Vec<Node<'_>> {
    let Some(body) = class_node.child_by_field_name("body") else {
        return Vec::new();
    };
    let mut cursor = body.walk();
    let mut methods = Vec::new();
    for child in body.children(&mut cursor) {
        match child.kind() {
            "function_definition" => methods.push(child),
            "decorated_definition" => {
                if let Some(def) = child.child_by_field_name("definition") {
                    if def.kind() == "function_definition" {
                        methods.push(def);
                    }
                }
            }
            _ => {}
        }
    }
    methods
}

/// Leading documentation string of a module, class, or function, extracted
/// verbatim: the text between the quotes, escape sequences untouched.
/// Absence and an empty string are distinct results.
pub(crate) fn docstring(node: Node<'_>, source: &str) -> Option<String> {
    let body = match node.kind() {
        "module" => node,
        _ => node.child_by_field_name("body")?,
    };
    // Comments are named nodes in this grammar; a leading comment does not
    // displace the docstring.
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment")?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.named_child(0)?;
    string_literal_text(expr, source)
}

fn string_literal_text(node: Node<'_>, source: &str) -> Option<String> {
    match node.kind() {
        "string" => single_string_text(node, source),
        "concatenated_string" => {
            let mut cursor = node.walk();
            let mut parts = Vec::new();
            for child in node.children(&mut cursor) {
                if child.kind() == "string" {
                    parts.push(single_string_text(child, source)?);
                }
            }
            if parts.is_empty() {
                None
            } else {
                Some(parts.concat())
            }
        }
        _ => None,
    }
}

/// Inner text of one string literal. Formatted and bytes literals do not
/// qualify as documentation, mirroring the host language's docstring rule.
fn single_string_text(node: Node<'_>, source: &str) -> Option<String> {
    let start = node.child(0)?;
    let end = node.child(node.child_count() - 1)?;
    if start.kind() != "string_start" || end.kind() != "string_end" {
        return None;
    }
    let opener = &source[start.byte_range()];
    let prefix = opener.trim_end_matches(['"', '\'']);
    if prefix.chars().any(|c| matches!(c, 'f' | 'F' | 'b' | 'B')) {
        return None;
    }
    Some(source[start.end_byte()..end.start_byte()].to_string())
}
