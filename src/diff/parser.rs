use crate::error::AppError;
use serde::Serialize;

/// Extension of the game source files the pipeline cares about.
pub const SOURCE_EXTENSION: &str = ".cs";

/// Changed lines for a single file in a unified diff.
///
/// Line numbers are 1-based positions in the post-change file. The diff is
/// produced with `--unified=0`, so every `+` line maps directly to a changed
/// line index with no context reconciliation.
#[derive(Debug, Clone, Serialize)]
pub struct FileDiff {
    /// Post-change path, relative to the repository root.
    pub path: String,
    /// 1-based post-change line numbers that were added or modified.
    #[serde(rename = "changedLines")]
    pub changed_lines: Vec<u32>,
}

/// Parse a combined multi-file unified diff into per-file changed lines.
///
/// Splits on `diff --git` boundaries and tracks the post-change path from
/// `+++ b/` lines. Files that were purely deleted (`+++ /dev/null`) and files
/// whose post-change path does not end in [`SOURCE_EXTENSION`] are skipped.
/// An empty diff yields an empty result; a malformed hunk header is a fatal
/// parse error.
pub fn parse_unified_diff(diff_output: &str) -> Result<Vec<FileDiff>, AppError> {
    let mut files: Vec<FileDiff> = Vec::new();
    let mut current: Option<FileDiff> = None;
    let mut new_line: u32 = 0;
    let mut in_hunk = false;

    for line in diff_output.lines() {
        if line.starts_with("diff --git ") {
            flush(&mut files, current.take());
            in_hunk = false;
        } else if let Some(path) = line.strip_prefix("+++ b/") {
            if path.ends_with(SOURCE_EXTENSION) {
                current = Some(FileDiff {
                    path: path.to_owned(),
                    changed_lines: Vec::new(),
                });
            } else {
                current = None;
            }
            in_hunk = false;
        } else if line.starts_with("+++ /dev/null") {
            // Deleted file, nothing to resolve on the post-change side.
            current = None;
            in_hunk = false;
        } else if line.starts_with("@@") {
            let (_, _, new_start, _) = parse_hunk_header(line)
                .ok_or_else(|| AppError::parse(format!("malformed hunk header: {line}")))?;
            new_line = new_start;
            in_hunk = true;
        } else if in_hunk {
            if line.starts_with('+') && !line.starts_with("+++") {
                if let Some(ref mut file) = current {
                    file.changed_lines.push(new_line);
                }
                new_line += 1;
            } else if line.starts_with(' ') || line.is_empty() {
                new_line += 1;
            }
            // '-' lines advance only the pre-change counter, which we don't
            // track; "\ No newline at end of file" markers are ignored.
        }
    }

    flush(&mut files, current);
    Ok(files)
}

fn flush(files: &mut Vec<FileDiff>, current: Option<FileDiff>) {
    if let Some(file) = current {
        if !file.changed_lines.is_empty() {
            files.push(file);
        }
    }
}

fn parse_hunk_header(line: &str) -> Option<(u32, u32, u32, u32)> {
    // @@ -old_start,old_count +new_start,new_count @@ optional context
    let line = line.trim_start_matches("@@ ");
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() < 2 {
        return None;
    }

    let old = parts[0].strip_prefix('-')?;
    let new = parts[1].strip_prefix('+')?;

    let (old_start, old_count) = parse_range(old)?;
    let (new_start, new_count) = parse_range(new)?;

    Some((old_start, old_count, new_start, new_count))
}

fn parse_range(range: &str) -> Option<(u32, u32)> {
    if let Some((start, count)) = range.split_once(',') {
        Some((start.parse().ok()?, count.parse().ok()?))
    } else {
        // Single line: "5" means line 5, count 1
        Some((range.parse().ok()?, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hunk_header() {
        assert_eq!(parse_hunk_header("@@ -1,5 +1,7 @@"), Some((1, 5, 1, 7)));
        assert_eq!(
            parse_hunk_header("@@ -10,3 +12,5 @@ void Foo()"),
            Some((10, 3, 12, 5))
        );
    }

    #[test]
    fn test_parse_hunk_header_single_line() {
        // Single line changes: count defaults to 1
        assert_eq!(parse_hunk_header("@@ -5 +5 @@"), Some((5, 1, 5, 1)));
        assert_eq!(parse_hunk_header("@@ -1 +1,3 @@"), Some((1, 1, 1, 3)));
    }

    #[test]
    fn test_parse_hunk_header_zero_lines() {
        assert_eq!(parse_hunk_header("@@ -1,0 +1,5 @@"), Some((1, 0, 1, 5)));
        assert_eq!(parse_hunk_header("@@ -1,5 +1,0 @@"), Some((1, 5, 1, 0)));
    }

    #[test]
    fn test_empty_diff() {
        let files = parse_unified_diff("").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_single_file_zero_context() {
        let diff = "\
diff --git a/MGSC/Player.cs b/MGSC/Player.cs
--- a/MGSC/Player.cs
+++ b/MGSC/Player.cs
@@ -10,0 +11,2 @@ public class Player
+        health -= amount;
+        OnDamaged();";
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "MGSC/Player.cs");
        assert_eq!(files[0].changed_lines, vec![11, 12]);
    }

    #[test]
    fn test_multiple_hunks_track_new_line_numbers() {
        let diff = "\
diff --git a/MGSC/Player.cs b/MGSC/Player.cs
--- a/MGSC/Player.cs
+++ b/MGSC/Player.cs
@@ -3 +3 @@
-old
+new
@@ -20,2 +20,3 @@
-a
-b
+x
+y
+z";
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files[0].changed_lines, vec![3, 20, 21, 22]);
    }

    #[test]
    fn test_multiple_files() {
        let diff = "\
diff --git a/MGSC/Player.cs b/MGSC/Player.cs
--- a/MGSC/Player.cs
+++ b/MGSC/Player.cs
@@ -1 +1 @@
-old
+new
diff --git a/MGSC/Inventory.cs b/MGSC/Inventory.cs
--- a/MGSC/Inventory.cs
+++ b/MGSC/Inventory.cs
@@ -7 +9,2 @@
+added
+added";
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "MGSC/Player.cs");
        assert_eq!(files[1].path, "MGSC/Inventory.cs");
        assert_eq!(files[1].changed_lines, vec![9, 10]);
    }

    #[test]
    fn test_deleted_file_skipped() {
        let diff = "\
diff --git a/MGSC/Gone.cs b/MGSC/Gone.cs
--- a/MGSC/Gone.cs
+++ /dev/null
@@ -1,2 +0,0 @@
-line1
-line2
diff --git a/MGSC/Kept.cs b/MGSC/Kept.cs
--- a/MGSC/Kept.cs
+++ b/MGSC/Kept.cs
@@ -1 +1 @@
-old
+new";
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "MGSC/Kept.cs");
    }

    #[test]
    fn test_non_source_extension_skipped() {
        let diff = "\
diff --git a/README.md b/README.md
--- a/README.md
+++ b/README.md
@@ -1 +1 @@
-old
+new";
        let files = parse_unified_diff(diff).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_deletion_only_hunk_yields_no_lines() {
        let diff = "\
diff --git a/MGSC/Player.cs b/MGSC/Player.cs
--- a/MGSC/Player.cs
+++ b/MGSC/Player.cs
@@ -4,2 +3,0 @@
-gone
-gone";
        let files = parse_unified_diff(diff).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_no_newline_marker_ignored() {
        let diff = "\
diff --git a/MGSC/Player.cs b/MGSC/Player.cs
--- a/MGSC/Player.cs
+++ b/MGSC/Player.cs
@@ -1 +1 @@
-old
+new
\\ No newline at end of file";
        let files = parse_unified_diff(diff).unwrap();
        assert_eq!(files[0].changed_lines, vec![1]);
    }

    #[test]
    fn test_malformed_hunk_header_is_fatal() {
        let diff = "\
diff --git a/MGSC/Player.cs b/MGSC/Player.cs
--- a/MGSC/Player.cs
+++ b/MGSC/Player.cs
@@ garbage @@";
        let err = parse_unified_diff(diff).unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
    }
}
