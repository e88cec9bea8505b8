//! Argument parsing for the `wordlight` CLI.
//!
//! The parser and subcommand types live in a library crate so tests and
//! documentation tooling can build the clap command without spawning the
//! binary; `main.rs` owns the actual run.
//!
//! - [`Cli`] — the root parser (clap derive)
//! - [`Commands`] — the subcommand set
//! - [`commands`] — per-subcommand implementations

pub mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// When to colorize the CLI's own status output.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Follow terminal detection.
    #[default]
    Auto,
    /// Force colors on.
    Always,
    /// Force colors off.
    Never,
}

impl ColorChoice {
    /// Apply this choice process-wide.
    ///
    /// Affects only status output; highlight markers are part of the
    /// rendered result, not terminal decoration, and are never stripped.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors already sniffs the terminal
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG               Log filter (e.g., debug, wordlight=trace)
    WORDLIGHT_LOG_PATH     Explicit log file path
    WORDLIGHT_LOG_DIR      Log directory
    WORDLIGHT_THRESHOLD    Default highlight threshold
";

/// Root argument parser for wordlight.
#[derive(Parser)]
#[command(name = "wordlight")]
#[command(about = "Highlight natural-language text in noisy documents by word frequency", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print just the version number (for scripts)
    #[arg(long)]
    pub version_only: bool,

    /// Configuration file to use instead of discovery
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Suppress everything but errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log detail (repeat for more, e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// When to color status output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Emit JSON instead of styled text
    #[arg(long, global = true)]
    pub json: bool,
}

/// The wordlight subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Render a file with natural-language runs highlighted
    Highlight(commands::highlight::HighlightArgs),

    /// Print the per-word highlight mask for a file
    Mask(commands::mask::MaskArgs),

    /// Print raw and smoothed per-word scores for a file
    Score(commands::score::ScoreArgs),

    /// Show package information
    Info(commands::info::InfoArgs),
}

/// The assembled clap command, for doc and completion generation.
pub fn command() -> clap::Command {
    Cli::command()
}
