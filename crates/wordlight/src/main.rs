//! Binary entry point for the wordlight CLI.
#![deny(unsafe_code)]

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use wordlight::{Cli, Commands, commands};
use wordlight_core::config::{Config, ConfigLoader};

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help has already shown usage when neither a
    // subcommand nor --version-only was given.
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("cannot change directory to {}", dir.display()))?;
    }

    let (config, config_sources) = {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        let mut loader = ConfigLoader::new().with_project_search(utf8_path(&cwd)?);
        if let Some(ref path) = cli.config {
            loader = loader.with_file(utf8_path(path)?);
        }
        loader.load().context("failed to load configuration")?
    };

    let _guard = {
        let destinations = observability::ObservabilityConfig::from_env_with_overrides(
            config.log_dir.as_ref().map(|d| d.as_std_path().to_path_buf()),
        );
        let filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
        observability::init_observability(&destinations, filter)
            .context("failed to initialize logging/tracing")?
    };

    tracing::debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        chdir = ?cli.chdir,
        "CLI initialized"
    );

    let max_input = input_limit(&config);
    let result = match command {
        Commands::Highlight(args) => {
            commands::highlight::cmd_highlight(args, cli.json, &config, max_input)
        }
        Commands::Mask(args) => commands::mask::cmd_mask(args, cli.json, &config, max_input),
        Commands::Score(args) => commands::score::cmd_score(args, cli.json, &config, max_input),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

/// Convert a path to UTF-8, failing with the offending path in the message.
fn utf8_path(path: &Path) -> anyhow::Result<camino::Utf8PathBuf> {
    camino::Utf8PathBuf::from_path_buf(path.to_path_buf())
        .map_err(|bad| anyhow::anyhow!("path is not valid UTF-8: {}", bad.display()))
}

/// Effective input-size cap: `None` disables the check entirely.
fn input_limit(config: &Config) -> Option<usize> {
    if config.disable_input_limit {
        None
    } else {
        Some(
            config
                .max_input_bytes
                .unwrap_or(wordlight_core::DEFAULT_MAX_INPUT_BYTES),
        )
    }
}
