//! Error types for document construction and tracing.

use thiserror::Error;

/// Errors raised while building a `ProgramDocument`
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Input bytes are not UTF-8 text
    #[error("G-code input must be UTF-8 text: {0}")]
    NotText(#[from] std::str::Utf8Error),
}

/// Errors raised while tracing or rendering a toolpath
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    /// A bounding box key is absent from the config table
    #[error("missing configuration key '{key}'")]
    MissingConfig { key: &'static str },

    /// A bounding box key is present but cannot be read
    #[error("malformed configuration value for '{key}': '{value}'")]
    MalformedConfig { key: &'static str, value: String },

    /// An axis parameter on a traced move is not a number
    #[error("{code}: parameter {axis} has non-numeric value '{value}'")]
    InvalidParameter {
        code: String,
        axis: char,
        value: String,
    },

    /// A partial trace fraction outside 0.0..=1.0
    #[error("trace fraction {0} is outside 0.0..=1.0")]
    InvalidFraction(f64),

    /// `render` was called before `trace`
    #[error("trace() must be called before render()")]
    NotTraced,
}
