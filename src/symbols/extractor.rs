//! Tree-sitter based routine extraction for C# source.

use super::{FileRoutines, RoutineSymbol};
use crate::error::AppError;
use tree_sitter::{Node, Parser};

/// Type declaration node kinds that can own member routines.
const OWNER_KINDS: [&str; 4] = [
    "class_declaration",
    "struct_declaration",
    "interface_declaration",
    "record_declaration",
];

/// Extract every member routine declared in `source`, in document order.
///
/// Returns `Ok(None)` when the text cannot be parsed into a tree; the caller
/// skips that file's contribution. A grammar-loading failure is fatal.
pub fn extract_routines(source: &str) -> Result<Option<FileRoutines>, AppError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .map_err(|e| AppError::parse(format!("failed to load C# grammar: {e}")))?;

    let Some(tree) = parser.parse(source, None) else {
        return Ok(None);
    };

    let mut routines = Vec::new();
    collect_routines(tree.root_node(), source, None, &mut routines);
    Ok(Some(FileRoutines { routines }))
}

/// Walk the tree collecting `method_declaration` nodes at any nesting depth,
/// tagging each with the simple name of its immediate enclosing type.
fn collect_routines(node: Node, source: &str, owner: Option<&str>, out: &mut Vec<RoutineSymbol>) {
    if node.kind() == "method_declaration" {
        if let (Some(owner), Some(name)) = (owner, find_child_text(node, "name", source)) {
            out.push(RoutineSymbol {
                owner: owner.to_owned(),
                name,
                start_line: node.start_position().row as u32 + 1,
                end_line: node.end_position().row as u32 + 1,
            });
        }
        return;
    }

    let next_owner = if OWNER_KINDS.contains(&node.kind()) {
        find_child_text(node, "name", source)
    } else {
        None
    };

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_routines(child, source, next_owner.as_deref().or(owner), out);
    }
}

fn node_text<'a>(node: Node<'a>, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// Find a named child field and return its text.
fn find_child_text(node: Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(n, source).to_owned())
}
