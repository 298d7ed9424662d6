//! Circuit document errors

use thiserror::Error;

/// Result type for circuit operations
pub type CircuitResult<T> = Result<T, CircuitError>;

/// Errors raised while reading or writing circuit documents
#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("Invalid circuit JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unsupported circuit version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Element #{index} has an empty type name")]
    UnnamedElement { index: usize },
}
