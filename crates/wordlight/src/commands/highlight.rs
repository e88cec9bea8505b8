//! Highlight command — render a file with natural-language runs marked up.

use camino::Utf8PathBuf;
use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

use wordlight_core::config::Config;
use wordlight_core::render::{HighlightColor, HighlightStyle};

use super::{build_highlighter, load_frequency_table, read_input_file, resolve_frequency_file};

/// Arguments for the `highlight` subcommand.
#[derive(Args, Debug)]
pub struct HighlightArgs {
    /// File to render.
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

    /// Span color for highlighted runs.
    #[arg(long, value_enum, value_name = "COLOR")]
    pub highlight_color: Option<HighlightColor>,

    /// Replace unhighlighted words with this string instead of showing them.
    #[arg(long, value_name = "STRING")]
    pub mask_out: Option<String>,
}

#[derive(Serialize)]
struct HighlightOutput {
    rendered: String,
}

/// Render a file with highlighted runs wrapped in ANSI markers (or with
/// everything outside the runs replaced by the substitute string).
#[instrument(name = "cmd_highlight", skip_all, fields(file = %args.file))]
pub fn cmd_highlight(
    args: HighlightArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, window = ?args.window, threshold = ?args.threshold, "executing highlight command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let freq_path = resolve_frequency_file(args.freq, config)?;
    let table = load_frequency_table(&freq_path)?;

    let highlighter = build_highlighter(table, args.window, args.threshold, config);
    let style = HighlightStyle {
        color: args
            .highlight_color
            .or(config.color)
            .unwrap_or_default(),
        mask_out: args.mask_out.or_else(|| config.mask_out.clone()),
    };

    let rendered = highlighter.render(&content, &style);

    if global_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&HighlightOutput { rendered })?
        );
    } else {
        println!("{rendered}");
    }

    Ok(())
}
