//! Harmony patch declarations extracted from mod sources.

pub mod extractor;

use serde::Serialize;
use std::collections::BTreeMap;

/// A single `[HarmonyPatch]` attribute found in a mod source file.
///
/// `target_type` and `target_member` are derived heuristically from the
/// attribute's arguments and default to empty when not derivable.
#[derive(Debug, Clone, Serialize)]
pub struct PatchDeclaration {
    /// Full path of the file the attribute was found in.
    #[serde(rename = "sourceFile")]
    pub source_file: String,
    /// Simple attribute name as written (qualified prefixes stripped).
    #[serde(rename = "attributeName")]
    pub attribute_name: String,
    /// The raw attribute text, trimmed.
    #[serde(rename = "declarationText")]
    pub declaration_text: String,
    #[serde(rename = "positionalArguments")]
    pub positional_arguments: Vec<String>,
    #[serde(rename = "namedArguments")]
    pub named_arguments: BTreeMap<String, String>,
    /// Textual form of the first `typeof(X)` argument, or empty.
    #[serde(rename = "targetType")]
    pub target_type: String,
    /// Simple name from the first `nameof(...)` or string-literal argument,
    /// or empty.
    #[serde(rename = "targetMember")]
    pub target_member: String,
}

impl PatchDeclaration {
    /// The qualified target key used for matching against the
    /// changed-routine set.
    ///
    /// Joined with `.` even when one side is empty (`.TakeDamage`,
    /// `Player.`); the matching semantics depend on this literal form.
    pub fn full_target(&self) -> String {
        format!("{}.{}", self.target_type, self.target_member)
    }
}
