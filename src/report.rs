//! Report records, final ordering, and TSV serialization.

use serde::Serialize;
use std::cmp::Ordering;

/// How a patch declaration relates to the game's changes.
///
/// `ParsedMatch` comes from the syntax-tree strategy, `TextMatch` and
/// `CopyWarning` from the text heuristics, `NoChange` marks a heuristic
/// declaration with no matching change. `Invalid` should never reach the
/// report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeType {
    Invalid,
    ParsedMatch,
    TextMatch,
    CopyWarning,
    NoChange,
}

impl ChangeType {
    /// Ordering value for the report sort. Parsed matches first, the two
    /// heuristics rank equal, everything else last.
    pub fn sort_order(self) -> u8 {
        match self {
            Self::ParsedMatch => 0,
            Self::TextMatch | Self::CopyWarning => 1,
            Self::NoChange | Self::Invalid => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "Invalid",
            Self::ParsedMatch => "ParsedMatch",
            Self::TextMatch => "TextMatch",
            Self::CopyWarning => "CopyWarning",
            Self::NoChange => "NoChange",
        }
    }
}

/// One row of the final report.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// The declaration or source line the record was produced from.
    #[serde(rename = "declarationLine")]
    pub declaration_line: String,
    /// Qualified patch target, or empty when the strategy has none.
    #[serde(rename = "patchTarget")]
    pub patch_target: String,
    #[serde(rename = "changeType")]
    pub change_type: ChangeType,
}

/// The report's global ordering: ascending file name, then classification
/// precedence, then patch target. Apply with a stable sort so ties keep
/// arrival order.
pub fn compare_records(a: &ChangeRecord, b: &ChangeRecord) -> Ordering {
    a.file_name
        .cmp(&b.file_name)
        .then_with(|| a.change_type.sort_order().cmp(&b.change_type.sort_order()))
        .then_with(|| a.patch_target.cmp(&b.patch_target))
}

const TSV_HEADER: &str = "ChangeType\tPatchTarget\tFileName\tDeclarationLine";

/// Render the merged record set as a TSV report.
///
/// Records are stably sorted with [`compare_records`] first. Every field is
/// quoted, embedded quotes are doubled, and line endings inside the
/// declaration text are replaced with spaces.
pub fn render_tsv(records: &[ChangeRecord]) -> String {
    let mut sorted: Vec<&ChangeRecord> = records.iter().collect();
    sorted.sort_by(|a, b| compare_records(a, b));

    let mut out = String::new();
    out.push_str(TSV_HEADER);
    out.push('\n');

    for record in sorted {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            quote_field(record.change_type.as_str()),
            quote_field(&record.patch_target),
            quote_field(&record.file_name),
            quote_field(&flatten_line_endings(&record.declaration_line)),
        ));
    }

    out
}

/// Quote a field unconditionally, doubling embedded quotes.
fn quote_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn flatten_line_endings(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file: &str, target: &str, change_type: ChangeType) -> ChangeRecord {
        ChangeRecord {
            file_name: file.to_owned(),
            declaration_line: format!("decl for {target}"),
            patch_target: target.to_owned(),
            change_type,
        }
    }

    #[test]
    fn test_sort_order_values() {
        assert_eq!(ChangeType::ParsedMatch.sort_order(), 0);
        assert_eq!(ChangeType::TextMatch.sort_order(), 1);
        assert_eq!(ChangeType::CopyWarning.sort_order(), 1);
        assert_eq!(ChangeType::NoChange.sort_order(), 3);
        assert_eq!(ChangeType::Invalid.sort_order(), 3);
    }

    #[test]
    fn test_compare_orders_by_file_then_type_then_target() {
        let mut records = vec![
            record("b.cs", "X.M", ChangeType::ParsedMatch),
            record("a.cs", "Z.M", ChangeType::NoChange),
            record("a.cs", "A.M", ChangeType::TextMatch),
            record("a.cs", "B.M", ChangeType::ParsedMatch),
        ];
        records.sort_by(compare_records);
        let keys: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.file_name.as_str(), r.patch_target.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a.cs", "B.M"),
                ("a.cs", "A.M"),
                ("a.cs", "Z.M"),
                ("b.cs", "X.M"),
            ]
        );
    }

    #[test]
    fn test_heuristics_rank_equal_and_keep_arrival_order() {
        let mut records = vec![
            record("a.cs", "", ChangeType::CopyWarning),
            record("a.cs", "", ChangeType::TextMatch),
        ];
        records.sort_by(compare_records);
        // Same file, same order value, same target: stable sort keeps
        // arrival order.
        assert_eq!(records[0].change_type, ChangeType::CopyWarning);
        assert_eq!(records[1].change_type, ChangeType::TextMatch);
    }

    #[test]
    fn test_tsv_header_and_quoting() {
        let tsv = render_tsv(&[record("Mod.cs", "Player.TakeDamage", ChangeType::ParsedMatch)]);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines[0], "ChangeType\tPatchTarget\tFileName\tDeclarationLine");
        assert_eq!(
            lines[1],
            "\"ParsedMatch\"\t\"Player.TakeDamage\"\t\"Mod.cs\"\t\"decl for Player.TakeDamage\""
        );
    }

    #[test]
    fn test_tsv_doubles_embedded_quotes() {
        let mut r = record("Mod.cs", "Player.TakeDamage", ChangeType::ParsedMatch);
        r.declaration_line = "HarmonyPatch(typeof(Player), \"TakeDamage\")".to_owned();
        let tsv = render_tsv(&[r]);
        assert!(tsv.contains("\"HarmonyPatch(typeof(Player), \"\"TakeDamage\"\")\""));
    }

    #[test]
    fn test_tsv_flattens_line_endings() {
        let mut r = record("Mod.cs", "Player.TakeDamage", ChangeType::ParsedMatch);
        r.declaration_line = "line one\r\nline two\nline three".to_owned();
        let tsv = render_tsv(&[r]);
        assert!(tsv.contains("\"line one line two line three\""));
    }

    #[test]
    fn test_tsv_empty_records_is_header_only() {
        let tsv = render_tsv(&[]);
        assert_eq!(tsv, "ChangeType\tPatchTarget\tFileName\tDeclarationLine\n");
    }

    #[test]
    fn test_render_does_not_mutate_input_order() {
        let records = vec![
            record("b.cs", "X.M", ChangeType::ParsedMatch),
            record("a.cs", "A.M", ChangeType::ParsedMatch),
        ];
        let _ = render_tsv(&records);
        assert_eq!(records[0].file_name, "b.cs");
    }
}
