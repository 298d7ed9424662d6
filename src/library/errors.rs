//! Element library errors

use thiserror::Error;

/// Result type for element library operations
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Errors raised by the element library and its logic cores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("Element type not found: {0}")]
    UnknownElementType(String),

    #[error("Element type already registered: {0}")]
    DuplicateElementType(String),

    #[error("{element}: expected {expected} input signals, got {found}")]
    PinMismatch {
        element: String,
        expected: usize,
        found: usize,
    },

    #[error("{element}: invalid attributes: {reason}")]
    InvalidAttributes { element: String, reason: String },

    #[error("{element}: evaluation failed: {reason}")]
    Evaluation { element: String, reason: String },
}

impl LibraryError {
    pub fn pin_mismatch(element: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::PinMismatch {
            element: element.into(),
            expected,
            found,
        }
    }

    pub fn invalid_attributes(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttributes {
            element: element.into(),
            reason: reason.into(),
        }
    }

    pub fn evaluation(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Evaluation {
            element: element.into(),
            reason: reason.into(),
        }
    }
}
