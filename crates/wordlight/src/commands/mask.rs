//! Mask command — per-word highlight flags.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wordlight_core::config::Config;

use super::{build_highlighter, load_frequency_table, read_input_file, resolve_frequency_file};

/// Arguments for the `mask` subcommand.
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Frequency data file (word,count CSV sorted descending).
    #[arg(long, value_name = "FILE")]
    pub freq: Option<Utf8PathBuf>,

    /// Smoothing window (positions on each side; odd is best).
    #[arg(long)]
    pub window: Option<usize>,

    /// Smoothed-score threshold for highlighting.
    #[arg(long, allow_hyphen_values = true)]
    pub threshold: Option<f64>,
}

/// Print the boolean highlight mask, one word per line (or as JSON).
#[instrument(name = "cmd_mask", skip_all, fields(file = %args.file))]
pub fn cmd_mask(
    args: MaskArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, window = ?args.window, threshold = ?args.threshold, "executing mask command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let freq_path = resolve_frequency_file(args.freq, config)?;
    let table = load_frequency_table(&freq_path)?;

    let highlighter = build_highlighter(table, args.window, args.threshold, config);
    let mask = highlighter.mask_words(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&mask)?);
        return Ok(());
    }

    for word in &mask {
        if word.highlighted {
            println!("{} {}", "+".green(), word.word);
        } else {
            println!("{} {}", "-".dimmed(), word.word.dimmed());
        }
    }

    Ok(())
}
