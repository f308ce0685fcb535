//! Builds the set of game routines whose bodies changed between two revisions.

use crate::diff::parser::parse_unified_diff;
use crate::error::AppError;
use crate::symbols::extractor::extract_routines;
use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Build the changed-routine set for a game source tree from raw diff text.
///
/// For every source file the diff touches that still exists on disk under
/// `game_source_root`, the current (post-change) text is parsed once and each
/// changed line is resolved to its enclosing routine. The result is the
/// deduplicated, unordered set of qualified `Owner.Routine` names.
///
/// Files missing on disk contribute nothing (they may have been deleted since
/// the diff was taken), as do changed lines that fall outside any routine
/// body. A file tree-sitter cannot parse is excluded with a warning.
pub fn build_changed_routine_set(
    game_source_root: &Path,
    diff_text: &str,
) -> Result<HashSet<String>, AppError> {
    let mut changed = HashSet::new();

    for file in parse_unified_diff(diff_text)? {
        let on_disk = game_source_root.join(&file.path);
        if !on_disk.exists() {
            debug!("skipping {}: not present on disk", file.path);
            continue;
        }

        let source = fs::read_to_string(&on_disk)?;
        let Some(routines) = extract_routines(&source)? else {
            warn!("skipping {}: source could not be parsed", file.path);
            continue;
        };

        for line in &file.changed_lines {
            if let Some(routine) = routines.resolve(*line) {
                changed.insert(routine.qualified_name());
            }
        }
    }

    Ok(changed)
}
