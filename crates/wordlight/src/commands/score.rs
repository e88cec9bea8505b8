//! Score command — raw and smoothed per-word scores.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wordlight_core::config::Config;

use super::{build_highlighter, load_frequency_table, read_input_file, resolve_frequency_file};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Frequency data file (word,count CSV sorted descending).
    #[arg(long, value_name = "FILE")]
    pub freq: Option<Utf8PathBuf>,

    /// Smoothing window (positions on each side; odd is best).
    #[arg(long)]
    pub window: Option<usize>,
}

/// Print raw and smoothed commonness scores, one word per line (or as JSON).
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, window = ?args.window, "executing score command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let freq_path = resolve_frequency_file(args.freq, config)?;
    let table = load_frequency_table(&freq_path)?;

    let highlighter = build_highlighter(table, args.window, None, config);
    let scored = highlighter.score_words(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&scored)?);
        return Ok(());
    }

    println!("{:>8} {:>8}  {}", "raw".dimmed(), "smooth".dimmed(), "word".dimmed());
    for word in &scored {
        println!(
            "{:>8.3} {:>8.3}  {}",
            word.raw_score, word.smoothed_score, word.word
        );
    }

    Ok(())
}
