pub mod patches;
pub mod report;
pub mod routines;

use std::fs;

/// Route output per destination string: empty means skip, `-` means stdout,
/// anything else is a file path.
pub(crate) fn output_data(destination: &str, text: &str) -> Result<(), String> {
    if destination.is_empty() {
        return Ok(());
    }
    if destination == "-" {
        println!("{text}");
        return Ok(());
    }
    fs::write(destination, text).map_err(|e| format!("failed to write {destination}: {e}"))
}
