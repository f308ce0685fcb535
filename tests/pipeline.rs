//! End-to-end pipeline tests: diff text + on-disk sources in, sorted change
//! records out. Git itself is not involved; the diff text is handed to the
//! pipeline directly.

use patchdrift::changes::build_changed_routine_set;
use patchdrift::matcher::match_declarations;
use patchdrift::patches::extractor::extract_patch_declarations;
use patchdrift::report::{compare_records, render_tsv, ChangeType};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PLAYER_SOURCE: &str = r#"namespace MGSC
{
    public class Player
    {
        public int Health;

        public void TakeDamage(int amount)
        {
            Health -= amount;
        }
    }
}
"#;

const PATCH_SOURCE: &str = r#"using HarmonyLib;

namespace DamageTweaks
{
    [HarmonyPatch(typeof(Player), nameof(Player.TakeDamage))]
    public static class Player_TakeDamage_Patch
    {
        public static bool Prefix(ref int amount)
        {
            amount /= 2;
            return true;
        }
    }
}
"#;

// Line 9 of PLAYER_SOURCE is inside TakeDamage.
const DIFF: &str = "\
diff --git a/MGSC/Player.cs b/MGSC/Player.cs
--- a/MGSC/Player.cs
+++ b/MGSC/Player.cs
@@ -9 +9 @@
-            Health -= amount * 2;
+            Health -= amount;
";

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn changed_method_is_matched_to_its_patch() {
    let game = TempDir::new().unwrap();
    let mods = TempDir::new().unwrap();
    write(game.path(), "MGSC/Player.cs", PLAYER_SOURCE);
    write(mods.path(), "DamageTweaks/Patch.cs", PATCH_SOURCE);

    let changed = build_changed_routine_set(game.path(), DIFF).unwrap();
    assert!(changed.contains("Player.TakeDamage"));

    let declarations = extract_patch_declarations(mods.path()).unwrap();
    assert_eq!(declarations.len(), 1);

    let records = match_declarations(&declarations, &changed);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].change_type, ChangeType::ParsedMatch);
    assert_eq!(records[0].patch_target, "Player.TakeDamage");
    assert!(records[0].file_name.ends_with("Patch.cs"));
}

#[test]
fn patch_for_unchanged_method_produces_no_record() {
    let game = TempDir::new().unwrap();
    let mods = TempDir::new().unwrap();
    write(game.path(), "MGSC/Player.cs", PLAYER_SOURCE);
    write(
        mods.path(),
        "Patch.cs",
        "[HarmonyPatch(typeof(Player), \"Heal\")]\npublic static class P { }\n",
    );

    let changed = build_changed_routine_set(game.path(), DIFF).unwrap();
    let declarations = extract_patch_declarations(mods.path()).unwrap();
    let records = match_declarations(&declarations, &changed);
    assert!(records.is_empty());
}

#[test]
fn pipeline_is_idempotent() {
    let game = TempDir::new().unwrap();
    let mods = TempDir::new().unwrap();
    write(game.path(), "MGSC/Player.cs", PLAYER_SOURCE);
    write(mods.path(), "Patch.cs", PATCH_SOURCE);

    let run = || {
        let changed = build_changed_routine_set(game.path(), DIFF).unwrap();
        let declarations = extract_patch_declarations(mods.path()).unwrap();
        let mut records = match_declarations(&declarations, &changed);
        records.sort_by(compare_records);
        render_tsv(&records)
    };

    assert_eq!(run(), run());
}

#[test]
fn diff_against_deleted_file_contributes_nothing() {
    let game = TempDir::new().unwrap();
    let mods = TempDir::new().unwrap();
    write(mods.path(), "Patch.cs", PATCH_SOURCE);

    // MGSC/Player.cs is named in the diff but absent on disk.
    let changed = build_changed_routine_set(game.path(), DIFF).unwrap();
    assert!(changed.is_empty());

    let declarations = extract_patch_declarations(mods.path()).unwrap();
    let records = match_declarations(&declarations, &changed);
    assert!(records.is_empty());
}
