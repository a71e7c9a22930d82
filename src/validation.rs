//! Client-local validation errors.
//!
//! These never reach the network. Each kind maps to one fixed,
//! user-facing message; all are recoverable by user action:
//! - Wrong file type
//! - No file uploaded
//! - No rules selected
//! - Too few rules for a comparison
//! - Unknown rule name

use thiserror::Error;

/// Validation result.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// The offered file is not an .xlsx workbook (or nothing was offered).
    InvalidFileType,
    /// A request was attempted before any file was accepted.
    MissingFile,
    /// A request was attempted with an empty selection.
    NoRulesSelected,
    /// A comparison was attempted with fewer than two rules.
    InsufficientRulesForComparison,
    /// A rule name outside the catalog.
    UnknownRule,
}

impl ValidationErrorKind {
    /// Fixed user-facing message for this kind.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationErrorKind::InvalidFileType => "Please select a valid Excel file (.xlsx)",
            ValidationErrorKind::MissingFile => "Please upload an Excel file first",
            ValidationErrorKind::NoRulesSelected => "Please select at least one rule to execute",
            ValidationErrorKind::InsufficientRulesForComparison => {
                "Please select at least two rules to compare"
            }
            ValidationErrorKind::UnknownRule => "Unknown dispatching rule",
        }
    }
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Error carrying the kind's fixed message.
    pub fn from_kind(kind: ValidationErrorKind) -> Self {
        Self::new(kind, kind.message())
    }
}

impl From<ValidationErrorKind> for ValidationError {
    fn from(kind: ValidationErrorKind) -> Self {
        Self::from_kind(kind)
    }
}
