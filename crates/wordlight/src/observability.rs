//! Logging and tracing initialization for the CLI.
//!
//! Human-readable status lines go to stderr; when a log path or directory
//! is configured, a second plain-text layer appends to a file via a
//! non-blocking writer. `RUST_LOG` overrides everything else.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// File name used when only a log directory is configured.
const LOG_FILE_NAME: &str = "wordlight.log";

/// Where log output should go, resolved from env vars and config.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Explicit log file path (`WORDLIGHT_LOG_PATH`).
    pub log_path: Option<PathBuf>,
    /// Log directory (`WORDLIGHT_LOG_DIR`, else config `log_dir`).
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve log destinations: env vars win over the config file value.
    ///
    /// Neither set means stderr-only logging; no file is touched.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os("WORDLIGHT_LOG_PATH").map(PathBuf::from);
        let log_dir = std::env::var_os("WORDLIGHT_LOG_DIR")
            .map(PathBuf::from)
            .or(config_log_dir);
        Self { log_path, log_dir }
    }

    /// The log file to append to, if file logging is enabled.
    fn resolved_log_file(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(|| {
            self.log_dir
                .as_ref()
                .map(|dir| dir.join(LOG_FILE_NAME))
        })
    }
}

/// Build the env filter from CLI verbosity flags and the configured level.
///
/// `RUST_LOG` wins when set; otherwise `--quiet` forces `error`, `-v` maps
/// to `debug`, `-vv` and beyond to `trace`, and the config file's
/// `log_level` is the default.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Keeps the non-blocking file writer flushing until the process exits.
///
/// Hold this for the lifetime of `main`; dropping it early loses buffered
/// log lines.
pub struct ObservabilityGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global tracing subscriber.
///
/// Always attaches a compact stderr layer. When `config` resolves to a log
/// file, also attaches a plain-text file layer writing through a
/// non-blocking appender.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let mut file_guard = None;
    let file_layer = match config.resolved_log_file() {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_name = path
                .file_name()
                .map_or_else(|| LOG_FILE_NAME.into(), std::ffi::OsStr::to_os_string);
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            Some(fmt::layer().with_writer(writer).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("tracing subscriber already initialized")?;

    Ok(ObservabilityGuard {
        _file_guard: file_guard,
    })
}
