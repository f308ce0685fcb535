//! Text heuristics over mod sources.
//!
//! Two plain line scans that complement the syntax-tree strategy: a
//! filename-convention match on `HarmonyPatch` lines, and a whole-word
//! `copy` scan flagging likely copy-and-replace patches. Both run over the
//! same inputs as the parsed strategy but stay separate stages; their
//! disagreement with it is part of the report.

use crate::error::AppError;
use crate::report::{ChangeRecord, ChangeType};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Default path prefix under which game class files live, one file per class.
pub const DEFAULT_SOURCE_PREFIX: &str = "MGSC/";

/// Reduce the changed-file list to bare class-name stems.
///
/// Only paths under `source_prefix` count; the prefix and the `.cs` suffix
/// are stripped. This is a crude convention: the class name is assumed to
/// equal the file stem.
pub fn changed_file_stems(changed_files: &[String], source_prefix: &str) -> HashSet<String> {
    changed_files
        .iter()
        .filter_map(|path| path.strip_prefix(source_prefix))
        .map(|rest| rest.strip_suffix(".cs").unwrap_or(rest).to_owned())
        .collect()
}

/// Scan mod sources for `HarmonyPatch` lines and match their `typeof(...)`
/// capture against the changed file stems.
///
/// Every scanned line produces a record: `TextMatch` when the captured type
/// is a changed stem, `NoChange` otherwise. Unlike the parsed strategy, this
/// one reports non-matches.
pub fn text_match_records(
    mods_root: &Path,
    changed_stems: &HashSet<String>,
) -> Result<Vec<ChangeRecord>, AppError> {
    // Matches [HarmonyPatch(typeof(Foo.Bar))]
    let typeof_re = Regex::new(r"\[HarmonyPatch\s*\(\s*typeof\(([^\)]+)\s*\)")
        .map_err(|e| AppError::parse(e.to_string()))?;

    let mut records = Vec::new();
    for_each_mod_line(mods_root, |file, line| {
        if !line.contains("HarmonyPatch") && !line.contains("HarmonyMethod") {
            return;
        }

        let patch_target = typeof_re
            .captures(line)
            .map(|captures| captures[1].trim().to_owned())
            .unwrap_or_default();

        let change_type = if changed_stems.contains(&patch_target) {
            ChangeType::TextMatch
        } else {
            ChangeType::NoChange
        };

        records.push(ChangeRecord {
            file_name: file.to_owned(),
            declaration_line: line.trim().to_owned(),
            patch_target,
            change_type,
        });
    })?;

    Ok(records)
}

/// Scan mod sources for lines containing the whole word `copy`.
///
/// By convention such lines mark a full copy-and-replace of a game routine,
/// e.g. `//COPY: full copy and replace of Foo.Bar`. Deliberately broad.
pub fn copy_warning_records(mods_root: &Path) -> Result<Vec<ChangeRecord>, AppError> {
    let copy_re = Regex::new(r"(?i)\bcopy\b").map_err(|e| AppError::parse(e.to_string()))?;

    let mut records = Vec::new();
    for_each_mod_line(mods_root, |file, line| {
        if copy_re.is_match(line) {
            records.push(ChangeRecord {
                file_name: file.to_owned(),
                declaration_line: line.trim().to_owned(),
                patch_target: String::new(),
                change_type: ChangeType::CopyWarning,
            });
        }
    })?;

    Ok(records)
}

/// Run `visit(file, line)` over every line of every C# file under `root`,
/// in lexicographic file order. An absent root visits nothing.
fn for_each_mod_line(
    root: &Path,
    mut visit: impl FnMut(&str, &str),
) -> Result<(), AppError> {
    if !root.is_dir() {
        return Ok(());
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| AppError::io(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("cs") {
            continue;
        }

        let file_name = entry.path().display().to_string();
        let contents = fs::read_to_string(entry.path())?;
        for line in contents.lines() {
            visit(&file_name, line);
        }
    }

    Ok(())
}
