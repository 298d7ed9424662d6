//! Insight pipeline errors
//!
//! Absent-by-design outcomes are `Ok(None)`, never errors. What remains is
//! split by severity:
//! - Recoverable: a template that can't be read or parsed, a logic core that
//!   fails. The façade downgrades these to "no insight".
//! - Fatal: the template data itself contradicts the configuration (a swap
//!   template without exactly two inputs, an inverter inserted twice).

use std::fmt;

use thiserror::Error;

use crate::library::LibraryError;

/// Severity of an insight error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Logged and absorbed into "no insight"
    Recoverable,
    /// Broken build-time configuration
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Recoverable => write!(f, "RECOVERABLE"),
            ErrorSeverity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Result type for insight operations
pub type InsightResult<T> = Result<T, InsightError>;

/// Errors raised inside the insight pipeline
#[derive(Debug, Error)]
pub enum InsightError {
    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Malformed template '{name}': {reason}")]
    TemplateMalformed { name: String, reason: String },

    #[error("Input swap needs exactly two inputs, template has {found}")]
    SwapInputCount { found: usize },

    #[error("Inverter already inserted ahead of input '{label}'")]
    DuplicateInverter { label: String },
}

impl InsightError {
    pub fn malformed(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::TemplateMalformed {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            InsightError::Library(LibraryError::UnknownElementType(_)) => "INSIGHT_UNKNOWN_ELEMENT_TYPE",
            InsightError::Library(_) => "INSIGHT_LOGIC_CORE_FAILED",
            InsightError::TemplateNotFound(_) => "INSIGHT_TEMPLATE_NOT_FOUND",
            InsightError::TemplateMalformed { .. } => "INSIGHT_TEMPLATE_MALFORMED",
            InsightError::SwapInputCount { .. } => "INSIGHT_SWAP_INPUT_COUNT",
            InsightError::DuplicateInverter { .. } => "INSIGHT_DUPLICATE_INVERTER",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            InsightError::SwapInputCount { .. } | InsightError::DuplicateInverter { .. } => {
                ErrorSeverity::Fatal
            }
            _ => ErrorSeverity::Recoverable,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }
}
