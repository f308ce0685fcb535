pub mod commands;

use crate::textscan::DEFAULT_SOURCE_PREFIX;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "patchdrift")]
#[command(
    author,
    version,
    about = "Map game source changes to the Harmony patches that target them",
    long_about = None
)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full pipeline and write the patch change report
    Report(ReportArgs),

    /// Print the routines changed between two revisions
    Routines {
        /// The first git commit hash or reference
        #[arg(short = 'a', long)]
        commit_a: String,

        /// The second git commit hash or reference
        #[arg(short = 'b', long)]
        commit_b: String,

        /// Path to the game source repository
        #[arg(short = 's', long)]
        game_source: String,

        /// Path to the git executable (defaults to `git` on PATH)
        #[arg(long)]
        git: Option<String>,
    },

    /// Print the patch declarations found in a mods directory
    Patches {
        /// Root directory of the mod sources
        #[arg(short = 'm', long)]
        mods: String,
    },
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// The first git commit hash or reference
    #[arg(short = 'a', long)]
    pub commit_a: String,

    /// The second git commit hash or reference
    #[arg(short = 'b', long)]
    pub commit_b: String,

    /// Path to the game source repository
    #[arg(short = 's', long)]
    pub game_source: String,

    /// Root directory of the mod sources
    #[arg(short = 'm', long)]
    pub mods: String,

    /// Where to write the patch report: a path, `-` for stdout, or empty to
    /// skip
    #[arg(long, default_value = "HarmonyReport.tsv")]
    pub report_file: String,

    /// Where to write the changed-file list: a path, `-` for stdout, or
    /// empty to skip
    #[arg(long, default_value = "GameFileChanges.tsv")]
    pub file_changes_file: String,

    /// Skip the "HarmonyPatch" text-match heuristic
    #[arg(long)]
    pub skip_text_matches: bool,

    /// Skip the whole-word "copy" warning scan
    #[arg(long)]
    pub skip_copy_warnings: bool,

    /// Path prefix of the game class files used by the text-match heuristic
    #[arg(long, default_value = DEFAULT_SOURCE_PREFIX)]
    pub source_prefix: String,

    /// Path to the git executable (defaults to `git` on PATH)
    #[arg(long)]
    pub git: Option<String>,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Report(args) => commands::report::run(&args, cli.format),
        Commands::Routines {
            commit_a,
            commit_b,
            game_source,
            git,
        } => commands::routines::run(&game_source, &commit_a, &commit_b, git.as_deref(), cli.format),
        Commands::Patches { mods } => commands::patches::run(&mods, cli.format),
    }
}
