use crate::cli::OutputFormat;
use crate::patches::extractor::extract_patch_declarations;
use colored::Colorize;
use std::path::Path;

pub fn run(mods: &str, format: OutputFormat) -> Result<(), String> {
    let declarations = extract_patch_declarations(Path::new(mods))?;

    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&declarations).map_err(|e| e.to_string())?
        );
        return Ok(());
    }

    if declarations.is_empty() {
        println!("No patch declarations found");
        return Ok(());
    }

    let mut current_file = String::new();
    for declaration in &declarations {
        if declaration.source_file != current_file {
            current_file = declaration.source_file.clone();
            println!("{}", current_file.bold());
        }
        println!("  {}  [{}]", declaration.full_target().cyan(), declaration.declaration_text);
    }
    println!(
        "{} {} declaration(s)",
        "Total:".dimmed(),
        declarations.len()
    );
    Ok(())
}
