//! Tree-sitter based extraction of Harmony patch attributes from mod sources.

use super::PatchDeclaration;
use crate::error::AppError;
use log::warn;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser};
use walkdir::WalkDir;

/// Literal marker every real patch declaration contains. Files without it are
/// skipped before the full parse; this is a short-circuit only and cannot
/// change the result set.
pub const PATCH_MARKER: &str = "HarmonyPatch";

/// Recursively scan `mods_root` for C# files and extract every attribute
/// whose simple name ends with [`PATCH_MARKER`].
///
/// Declarations are emitted in file-scan order (lexicographic by file name),
/// then document order within a file. An absent mods directory yields an
/// empty list.
pub fn extract_patch_declarations(mods_root: &Path) -> Result<Vec<PatchDeclaration>, AppError> {
    let mut results = Vec::new();

    if !mods_root.is_dir() {
        return Ok(results);
    }

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .map_err(|e| AppError::parse(format!("failed to load C# grammar: {e}")))?;

    for entry in WalkDir::new(mods_root).sort_by_file_name() {
        let entry = entry.map_err(|e| AppError::io(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("cs") {
            continue;
        }

        let source = fs::read_to_string(entry.path())?;
        if !source.contains(PATCH_MARKER) {
            continue;
        }

        let Some(tree) = parser.parse(&source, None) else {
            warn!(
                "skipping {}: source could not be parsed",
                entry.path().display()
            );
            continue;
        };

        let file_name = entry.path().display().to_string();
        collect_attributes(tree.root_node(), &source, &file_name, &mut results);
    }

    Ok(results)
}

/// Walk the tree in document order collecting matching attribute nodes.
fn collect_attributes(node: Node, source: &str, file: &str, out: &mut Vec<PatchDeclaration>) {
    if node.kind() == "attribute" {
        if let Some(declaration) = attribute_to_declaration(node, source, file) {
            out.push(declaration);
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_attributes(child, source, file, out);
    }
}

fn attribute_to_declaration(node: Node, source: &str, file: &str) -> Option<PatchDeclaration> {
    let attribute_name = simple_attribute_name(node, source)?;
    if !attribute_name.ends_with(PATCH_MARKER) {
        return None;
    }

    // A declaration with no argument list has no derivable target.
    let argument_list = child_of_kind(node, "attribute_argument_list")?;

    let mut positional_arguments = Vec::new();
    let mut named_arguments = BTreeMap::new();
    let mut target_type: Option<String> = None;
    let mut target_member: Option<String> = None;

    let mut cursor = argument_list.walk();
    for argument in argument_list.children(&mut cursor) {
        if argument.kind() != "attribute_argument" {
            continue;
        }

        let Some(expression) = argument_expression(argument) else {
            continue;
        };

        let value = unwrap_string_literal(expression, source)
            .unwrap_or_else(|| node_text(expression, source).to_owned());

        match argument_name(argument, source) {
            Some(name) => {
                named_arguments.insert(name, value);
            }
            None => positional_arguments.push(value),
        }

        // Heuristic extraction; first match wins on both sides.
        if target_type.is_none() {
            target_type = try_extract_type_name(expression, source);
        }
        if target_member.is_none() {
            target_member = try_extract_member_name(expression, source);
        }
    }

    Some(PatchDeclaration {
        source_file: file.to_owned(),
        attribute_name,
        declaration_text: node_text(node, source).trim().to_owned(),
        positional_arguments,
        named_arguments,
        target_type: target_type.unwrap_or_default(),
        target_member: target_member.unwrap_or_default(),
    })
}

/// The attribute's simple name: the rightmost identifier for qualified and
/// alias-qualified forms, the raw text otherwise.
fn simple_attribute_name(attribute: Node, source: &str) -> Option<String> {
    let name = attribute.child_by_field_name("name")?;
    let simple = match name.kind() {
        "qualified_name" | "alias_qualified_name" => name
            .child_by_field_name("name")
            .map(|n| node_text(n, source).to_owned())
            .unwrap_or_else(|| node_text(name, source).to_owned()),
        _ => node_text(name, source).to_owned(),
    };
    Some(simple)
}

/// Name of a `name = value` or `name: value` argument, if any.
///
/// The grammar has no distinct node for the name part: a named argument is
/// a leading `identifier` followed by a bare `:` or `=` token, then the
/// expression.
fn argument_name(argument: Node, source: &str) -> Option<String> {
    if !has_name_separator(argument) {
        return None;
    }
    let first = argument.named_child(0)?;
    if first.kind() != "identifier" {
        return None;
    }
    Some(node_text(first, source).to_owned())
}

fn has_name_separator(argument: Node) -> bool {
    (0..argument.child_count())
        .filter_map(|i| argument.child(i))
        .any(|c| matches!(c.kind(), ":" | "="))
}

/// The argument's expression: its last named child, which skips past the
/// name identifier of a named argument.
fn argument_expression(argument: Node) -> Option<Node> {
    let count = argument.named_child_count();
    if count == 0 {
        return None;
    }
    argument.named_child(count - 1)
}

/// `typeof(X)` yields the textual form of `X`.
fn try_extract_type_name(expression: Node, source: &str) -> Option<String> {
    if expression.kind() != "typeof_expression" {
        return None;
    }
    expression
        .child_by_field_name("type")
        .map(|n| node_text(n, source).to_owned())
}

/// `nameof(...)` yields the referenced member's simple name; a bare string
/// literal yields its unwrapped text. Anything else is not a member name.
fn try_extract_member_name(expression: Node, source: &str) -> Option<String> {
    if expression.kind() == "invocation_expression" {
        let function = expression.child_by_field_name("function")?;
        if node_text(function, source) != "nameof" {
            return None;
        }
        let arguments = expression.child_by_field_name("arguments")?;
        let inner = child_of_kind(arguments, "argument")?;
        let inner_expression = inner.named_child(0)?;
        let member = match inner_expression.kind() {
            "member_access_expression" => inner_expression
                .child_by_field_name("name")
                .map(|n| node_text(n, source).to_owned())
                .unwrap_or_else(|| node_text(inner_expression, source).to_owned()),
            _ => node_text(inner_expression, source).to_owned(),
        };
        return Some(member);
    }

    unwrap_string_literal(expression, source)
}

/// Unwrap a string-literal expression to its value text, or `None` when the
/// expression is not a string literal.
fn unwrap_string_literal(expression: Node, source: &str) -> Option<String> {
    let text = node_text(expression, source);
    match expression.kind() {
        "string_literal" => {
            let inner = text.strip_prefix('"')?.strip_suffix('"')?;
            Some(unescape(inner))
        }
        "verbatim_string_literal" => {
            let inner = text.strip_prefix("@\"")?.strip_suffix('"')?;
            Some(inner.replace("\"\"", "\""))
        }
        "raw_string_literal" => Some(text.trim_matches('"').trim().to_owned()),
        _ => None,
    }
}

/// Resolve the escape sequences a member name can realistically carry.
/// Escapes that are not recognized are kept as written, backslash included.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('u') => {
                // \uXXXX takes exactly four hex digits.
                let mut rest = chars.clone();
                let digits: String = rest.by_ref().take(4).collect();
                let decoded = (digits.len() == 4)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        chars = rest;
                    }
                    None => out.push_str("\\u"),
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .find(|c| c.kind() == kind)
}

fn node_text<'a>(node: Node<'a>, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}
