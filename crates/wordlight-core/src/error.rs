//! Error types for wordlight-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while building a frequency table.
#[derive(Error, Debug)]
pub enum FrequencyError {
    /// The frequency source yielded no rows, so there is no maximum count
    /// to scale against.
    #[error("frequency source contains no rows")]
    EmptySource,

    /// A row's count could not be parsed as a non-negative number.
    #[error("invalid count {value:?} for word {word:?}")]
    InvalidCount {
        /// The word whose row failed to parse.
        word: String,
        /// The raw count value from the source.
        value: String,
    },

    /// The first (maximum) count is zero, which would make every relative
    /// frequency undefined.
    #[error("maximum count is zero; cannot derive relative frequencies")]
    ZeroMaxCount,
}

/// Result type alias using [`FrequencyError`].
pub type FrequencyResult<T> = Result<T, FrequencyError>;

/// Errors that can occur during text analysis and rendering.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// An unknown window aggregate name was provided.
    #[error("unknown aggregate: {name}. Use: {available}")]
    UnknownAggregate {
        /// The aggregate name that was requested.
        name: String,
        /// Comma-separated list of valid aggregate names.
        available: String,
    },

    /// An unknown highlight color name was provided.
    #[error("unknown color: {name}. Use: {available}")]
    UnknownColor {
        /// The color name that was requested.
        name: String,
        /// Comma-separated list of valid color names.
        available: String,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
