//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Manifest parsing error.
    #[error("manifest parse error: {0}")]
    Parse(#[from] sosgen_model::ParseError),

    /// Model validation error.
    #[error("model error: {0}")]
    Model(#[from] sosgen_model::ModelError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output collection error.
    #[error("output error for '{key}': {message}")]
    Output {
        /// Key of the unit that could not be collected.
        key: String,
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates an output error for the given unit key.
    pub fn output(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Output {
            key: key.into(),
            message: message.into(),
        }
    }
}
