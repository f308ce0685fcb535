//! Matches extracted patch declarations against the changed-routine set.

use crate::patches::PatchDeclaration;
use crate::report::{ChangeRecord, ChangeType};
use std::collections::HashSet;

/// Classify each declaration against the changed-routine set.
///
/// A declaration whose `full_target` is literally present in the set
/// (case-sensitive) yields a `ParsedMatch` record; everything else is
/// dropped. Unlike the text heuristic, this strategy does not report
/// non-matches.
pub fn match_declarations(
    declarations: &[PatchDeclaration],
    changed_routines: &HashSet<String>,
) -> Vec<ChangeRecord> {
    declarations
        .iter()
        .filter(|declaration| changed_routines.contains(&declaration.full_target()))
        .map(|declaration| ChangeRecord {
            file_name: declaration.source_file.clone(),
            declaration_line: declaration.declaration_text.clone(),
            patch_target: declaration.full_target(),
            change_type: ChangeType::ParsedMatch,
        })
        .collect()
}
