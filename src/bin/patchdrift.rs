//! patchdrift binary: reports which Harmony patches target changed game
//! routines between two git revisions.

use clap::Parser;
use patchdrift::cli::{run, Cli};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
