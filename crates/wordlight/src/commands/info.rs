//! Info command — package metadata and effective configuration.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};
use wordlight_core::config::{Config, ConfigSources, user_config_dir};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // Only the global --json flag applies here.
}

/// Everything `info` reports: build-time package fields at the top level,
/// the effective configuration nested under `config`.
#[derive(Serialize)]
struct InfoReport {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
    config: EffectiveConfig,
}

#[derive(Serialize)]
struct EffectiveConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    window: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mask_out: Option<String>,
}

impl InfoReport {
    fn gather(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
            config: EffectiveConfig {
                config_file: sources.primary_file().map(ToString::to_string),
                log_level: config.log_level.as_str().to_string(),
                log_dir: config.log_dir.as_ref().map(ToString::to_string),
                frequency_file: config.frequency_file.as_ref().map(ToString::to_string),
                window: config.window,
                threshold: config.threshold,
                color: config.color.map(|c| c.as_str().to_string()),
                mask_out: config.mask_out.clone(),
            },
        }
    }
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");
    let report = InfoReport::gather(config, sources);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", report.name.bold(), report.version.green());
    if !report.description.is_empty() {
        println!("{}", report.description);
    }
    if !report.license.is_empty() {
        println!("{}: {}", "License".dimmed(), report.license);
    }
    if !report.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), report.repository.cyan());
    }

    println!();
    println!("{}", "Configuration".bold().underline());
    match report.config.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    if let Some(dir) = user_config_dir() {
        println!("{}: {}", "User config dir".dimmed(), dir);
    }
    println!("{}: {}", "Log level".dimmed(), report.config.log_level);
    if let Some(ref dir) = report.config.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Pipeline Defaults".bold().underline());
    line("Frequency file", report.config.frequency_file.as_deref());
    line("Window", report.config.window.map(|w| w.to_string()).as_deref());
    line(
        "Threshold",
        report.config.threshold.map(|t| format!("{t:.1}")).as_deref(),
    );
    line("Color", report.config.color.as_deref());
    line("Mask-out", report.config.mask_out.as_deref());

    Ok(())
}

/// One labelled line; absent values print as "(not set)".
fn line(label: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("{}: {}", label.dimmed(), v),
        None => println!("{}: {}", label.dimmed(), "(not set)".dimmed()),
    }
}
