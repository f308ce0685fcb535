use super::output_data;
use crate::changes::build_changed_routine_set;
use crate::cli::{OutputFormat, ReportArgs};
use crate::error::AppError;
use crate::matcher::match_declarations;
use crate::patches::extractor::extract_patch_declarations;
use crate::report::{compare_records, render_tsv, ChangeRecord};
use crate::sources::git::GitSource;
use crate::textscan::{changed_file_stems, copy_warning_records, text_match_records};
use std::path::{Path, PathBuf};

pub fn run(args: &ReportArgs, format: OutputFormat) -> Result<(), String> {
    let game_source = Path::new(&args.game_source);
    let mods_root = Path::new(&args.mods);

    let mut source = GitSource::new(game_source.to_path_buf()).map_err(AppError::from)?;
    if let Some(ref git) = args.git {
        source = source.with_git_program(PathBuf::from(git));
    }

    let changed_files = source
        .changed_files(&args.commit_a, &args.commit_b)
        .map_err(AppError::from)?;
    let diff_text = source
        .diff_zero_context(&args.commit_a, &args.commit_b)
        .map_err(AppError::from)?;

    let mut records: Vec<ChangeRecord> = Vec::new();

    if !args.skip_text_matches {
        let stems = changed_file_stems(&changed_files, &args.source_prefix);
        records.extend(text_match_records(mods_root, &stems)?);
    }

    let changed_routines = build_changed_routine_set(game_source, &diff_text)?;
    let declarations = extract_patch_declarations(mods_root)?;
    records.extend(match_declarations(&declarations, &changed_routines));

    if !args.skip_copy_warnings {
        records.extend(copy_warning_records(mods_root)?);
    }

    let report_text = match format {
        OutputFormat::Text => render_tsv(&records),
        OutputFormat::Json => {
            let mut sorted = records.clone();
            sorted.sort_by(compare_records);
            serde_json::to_string_pretty(&sorted).map_err(|e| e.to_string())?
        }
    };

    output_data(&args.report_file, &report_text)?;
    output_data(&args.file_changes_file, &changed_files.join("\n"))?;

    Ok(())
}
