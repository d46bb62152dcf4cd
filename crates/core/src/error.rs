//! Error types for the term-performance engine.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the term-performance engine.
///
/// Missing boundary data and non-computable returns are not errors; they
/// show up as omissions from ranked output. Only structurally invalid
/// input ends up here.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed interval (e.g. start after end on a closed term).
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// Malformed price series (unordered, duplicate or non-finite points).
    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    /// A data provider could not supply its input.
    #[error("Provider error: {0}")]
    Provider(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid interval error.
    pub fn invalid_interval(msg: impl Into<String>) -> Self {
        Error::InvalidInterval(msg.into())
    }

    /// Create an invalid series error.
    pub fn invalid_series(msg: impl Into<String>) -> Self {
        Error::InvalidSeries(msg.into())
    }

    /// Create a provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Error::Provider(msg.into())
    }

    /// True for errors caused by malformed caller input.
    pub fn is_input_violation(&self) -> bool {
        matches!(self, Error::InvalidInterval(_) | Error::InvalidSeries(_))
    }
}
