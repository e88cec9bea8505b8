//! Configuration discovery and merging.
//!
//! Configuration comes from up to four layers, merged through figment with
//! later layers winning:
//!
//! 1. built-in defaults
//! 2. user config: `~/.config/wordlight/config.<ext>`
//! 3. project config: `wordlight.<ext>` or `.wordlight.<ext>`, found by
//!    walking up from the search root (the walk stops at a `.git` boundary)
//! 4. explicit files (e.g. a `--config` flag), then `WORDLIGHT_` env vars
//!
//! `<ext>` is `toml`, `yaml`, `yml`, or `json`. If one directory holds
//! several matching files they all merge, dotfiles first, so
//! `wordlight.toml` beats `.wordlight.toml` and `json` beats `toml`.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use wordlight_core::config::{Config, ConfigLoader};
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap())
//!     .expect("current directory is not valid UTF-8");
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::render::HighlightColor;
use crate::smoothing::EnsembleWeights;

/// File-name stem shared by config files and the XDG directory.
const APP_NAME: &str = "wordlight";

/// Recognized config file extensions, lowest merge precedence first.
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Merged wordlight configuration.
///
/// Pipeline fields are all optional: a field left unset here defers to the
/// matching CLI flag and finally to the built-in defaults (window 3,
/// threshold 4.5, cyan).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level when `RUST_LOG` and verbosity flags are absent.
    pub log_level: LogLevel,
    /// Directory to write log files into; unset disables file logging.
    pub log_dir: Option<Utf8PathBuf>,
    /// Frequency data file (`word,count` CSV, sorted descending by count).
    pub frequency_file: Option<Utf8PathBuf>,
    /// Smoothing window for the pipeline commands.
    pub window: Option<usize>,
    /// Smoothed-score threshold for `mask` and `highlight`.
    pub threshold: Option<f64>,
    /// Span color for `highlight`.
    pub color: Option<HighlightColor>,
    /// Substitute string replacing unhighlighted words.
    pub mask_out: Option<String>,
    /// Ensemble blend weights; should sum to 1.0.
    pub weights: Option<EnsembleWeights>,
    /// Cap on input file size in bytes. Unset means the built-in 5 MiB.
    pub max_input_bytes: Option<usize>,
    /// Skip the input size check entirely; `max_input_bytes` is then
    /// ignored.
    pub disable_input_limit: bool,
}

/// Log verbosity configured through files or env.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-stage diagnostics.
    Debug,
    /// Normal operation (default).
    #[default]
    Info,
    /// Suspicious but non-fatal conditions.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Lowercase name, as accepted by tracing env filters.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which files actually contributed to a loaded [`Config`].
///
/// Handed back by [`ConfigLoader::load`] so commands can report where
/// values came from without repeating the discovery walk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Discovered project files, lowest merge precedence first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file, if one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files passed in explicitly, in the order given.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file whose values win: explicit beats project beats user.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .or_else(|| self.project_files.last())
            .map(Utf8PathBuf::as_path)
            .or(self.user_file.as_deref())
    }
}

/// Builder that assembles the figment layer stack and runs discovery.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// A loader with user config enabled and a `.git` walk boundary.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Enable project discovery, walking up from `path`.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Toggle the user-config layer (`~/.config/wordlight/`).
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Replace the walk boundary. The walk stops at the first ancestor
    /// containing a file or directory of this name (default `.git`),
    /// after that ancestor itself has been checked for config files.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Let the walk continue to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Queue an explicit file. Explicit files merge after everything
    /// discovered, in the order they were added.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Run discovery and merge every layer into a [`Config`].
    ///
    /// Absent files are not an error; the result falls back to defaults.
    /// Env vars use the `WORDLIGHT_` prefix with lowercased key names
    /// (`WORDLIGHT_THRESHOLD=5.0` sets `threshold`).
    ///
    /// # Errors
    ///
    /// [`ConfigError::Deserialize`] when a discovered or explicit file
    /// fails to parse into [`Config`].
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let mut sources = ConfigSources::default();
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if self.include_user_config
            && let Some(user_file) = find_user_config()
        {
            figment = merge_file(figment, &user_file);
            sources.user_file = Some(user_file);
        }

        if let Some(ref root) = self.project_search_root {
            sources.project_files = self.find_project_configs(root);
            for file in &sources.project_files {
                figment = merge_file(figment, file);
            }
        }

        for file in &self.explicit_files {
            figment = merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        figment = figment.merge(Env::prefixed("WORDLIGHT_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(
            log_level = config.log_level.as_str(),
            primary = ?sources.primary_file(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but refuse to fall through to pure
    /// defaults: errors with [`ConfigError::NotFound`] when no layer has a
    /// file to contribute.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let any_source = !self.explicit_files.is_empty()
            || (self.include_user_config && find_user_config().is_some())
            || self
                .project_search_root
                .as_ref()
                .is_some_and(|root| !self.find_project_configs(root).is_empty());

        if any_source { self.load() } else { Err(ConfigError::NotFound) }
    }

    /// Walk upward from `start` and return the config files of the first
    /// directory that has any, dotfiles before regular names so the
    /// regular name wins the merge.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut dir = Some(start.to_path_buf());

        while let Some(d) = dir {
            let found = configs_in(&d);
            if !found.is_empty() {
                return found;
            }

            // Boundary check comes second so a config sitting next to the
            // marker is still found.
            let at_boundary = self
                .boundary_marker
                .as_ref()
                .is_some_and(|marker| d.join(marker).exists() && d != start);
            if at_boundary {
                break;
            }

            dir = d.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }
}

/// Config files present in one directory, lowest merge precedence first.
fn configs_in(dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut found = Vec::new();
    for name in [format!(".{APP_NAME}"), APP_NAME.to_string()] {
        for ext in CONFIG_EXTENSIONS {
            let candidate = dir.join(format!("{name}.{ext}"));
            if candidate.is_file() {
                found.push(candidate);
            }
        }
    }
    found
}

/// The user config file under the XDG config directory, if present.
fn find_user_config() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Merge one file into the figment, picking the provider by extension.
fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

/// Platform config directory for wordlight (`~/.config/wordlight` on
/// Linux). `None` when the home directory cannot be resolved or the path
/// is not UTF-8.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}
