//! Core library for wordlight.
//!
//! This crate scores the words of a document by how common they are in
//! natural language, smooths the scores across a sliding window, and turns
//! the result into a boolean highlight mask or an inline-marked rendering.
//! The `wordlight` CLI and any downstream consumers build on it.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`frequency`] - Relative word frequency table
//! - [`scorer`] - Per-token commonness scoring
//! - [`smoothing`] - Sliding-window aggregates and ensemble blending
//! - [`pipeline`] - The document pipeline ([`Highlighter`])
//! - [`render`] - Span markup rendering
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use wordlight_core::{FrequencyRow, FrequencyTable, Highlighter};
//!
//! let rows = vec![
//!     FrequencyRow { word: "the".into(), count: "23135851162".into() },
//!     FrequencyRow { word: "of".into(), count: "13151942776".into() },
//! ];
//! let table = Arc::new(FrequencyTable::build(rows).expect("valid frequency data"));
//! let highlighter = Highlighter::new(table);
//!
//! for word in highlighter.mask_words("the of qzxv") {
//!     println!("{} {}", word.word, word.highlighted);
//! }
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod error;

pub mod frequency;

pub mod pipeline;

pub mod render;

pub mod scorer;

pub mod smoothing;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};

pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, FrequencyError, FrequencyResult,
};

pub use frequency::{FrequencyRow, FrequencyTable};

pub use pipeline::{DEFAULT_THRESHOLD, DEFAULT_WINDOW, Highlighter, MaskedWord, ScoredWord};

pub use render::{HighlightColor, HighlightStyle};

pub use smoothing::{Aggregate, EnsembleWeights};

/// Default cap on input size (5 MiB) for callers that read whole files.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
