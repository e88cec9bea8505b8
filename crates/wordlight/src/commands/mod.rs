//! Command implementations.

use std::sync::Arc;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};

use wordlight_core::config::Config;
use wordlight_core::frequency::{FrequencyRow, FrequencyTable};
use wordlight_core::pipeline::{DEFAULT_THRESHOLD, DEFAULT_WINDOW, Highlighter};

pub mod highlight;
pub mod info;
pub mod mask;
pub mod score;

/// Read a file and validate its size against the configured limit.
///
/// Combines the file-read and size-validation steps that every pipeline
/// command needs.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Resolve the frequency data file: `--freq` flag first, then config.
pub fn resolve_frequency_file(
    flag: Option<Utf8PathBuf>,
    config: &Config,
) -> anyhow::Result<Utf8PathBuf> {
    flag.or_else(|| config.frequency_file.clone()).ok_or_else(|| {
        anyhow::anyhow!("no frequency file: pass --freq or set frequency_file in config")
    })
}

/// Load a `word,count` CSV and build the frequency table from it.
///
/// The file must carry a header row naming the `word` and `count` columns
/// and be sorted descending by count.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load_frequency_table(path: &Utf8Path) -> anyhow::Result<Arc<FrequencyTable>> {
    let mut reader = csv::Reader::from_path(path.as_std_path())
        .with_context(|| format!("failed to open frequency file {path}"))?;
    let rows: Vec<FrequencyRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .with_context(|| format!("malformed frequency file {path}"))?;
    let table = FrequencyTable::build(rows)
        .with_context(|| format!("invalid frequency data in {path}"))?;
    tracing::debug!(words = table.len(), "frequency table loaded");
    Ok(Arc::new(table))
}

/// Build a [`Highlighter`] from flag values, falling back to config, then
/// to the built-in defaults.
pub fn build_highlighter(
    table: Arc<FrequencyTable>,
    window: Option<usize>,
    threshold: Option<f64>,
    config: &Config,
) -> Highlighter {
    let mut highlighter = Highlighter::new(table)
        .with_window(window.or(config.window).unwrap_or(DEFAULT_WINDOW))
        .with_threshold(threshold.or(config.threshold).unwrap_or(DEFAULT_THRESHOLD));
    if let Some(weights) = config.weights {
        highlighter = highlighter.with_weights(weights);
    }
    highlighter
}
