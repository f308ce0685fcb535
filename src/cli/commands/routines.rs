use crate::changes::build_changed_routine_set;
use crate::cli::OutputFormat;
use crate::error::AppError;
use crate::sources::git::GitSource;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub fn run(
    game_source: &str,
    commit_a: &str,
    commit_b: &str,
    git: Option<&str>,
    format: OutputFormat,
) -> Result<(), String> {
    let mut source = GitSource::new(PathBuf::from(game_source)).map_err(AppError::from)?;
    if let Some(git) = git {
        source = source.with_git_program(PathBuf::from(git));
    }

    let diff_text = source
        .diff_zero_context(commit_a, commit_b)
        .map_err(AppError::from)?;
    let changed = build_changed_routine_set(Path::new(game_source), &diff_text)?;

    let mut names: Vec<String> = changed.into_iter().collect();
    names.sort();

    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&names).map_err(|e| e.to_string())?
        );
        return Ok(());
    }

    if names.is_empty() {
        println!("No changed routines found");
        return Ok(());
    }

    for name in &names {
        println!("{name}");
    }
    println!(
        "{} {} routine(s) changed",
        "Total:".dimmed(),
        names.len()
    );
    Ok(())
}
