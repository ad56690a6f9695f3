//! Centralized error handling for autoviz.
//!
//! Every core operation returns either a well-formed result or exactly one
//! [`AutovizError`]. The variants map onto the stages of the pipeline:
//!
//! | Stage      | Variants                                          |
//! |------------|---------------------------------------------------|
//! | Load       | [`AutovizError::Parse`], [`AutovizError::EmptyInput`] |
//! | Selection  | [`AutovizError::InvalidAxis`], [`AutovizError::TypeMismatch`] |
//! | Regression | [`AutovizError::InsufficientData`], [`AutovizError::DegenerateInput`], [`AutovizError::NumericOverflow`] |
//!
//! The Presentation Layer turns these into user-facing messages; the core
//! never recovers or substitutes defaults on its own.
//!
//! ```
//! use autoviz::error::AutovizError;
//!
//! fn describe(err: &AutovizError) -> &'static str {
//!     match err {
//!         AutovizError::Parse(_) | AutovizError::EmptyInput => "check the file",
//!         AutovizError::InvalidAxis(_) | AutovizError::TypeMismatch { .. } => "pick other columns",
//!         _ => "try again",
//!     }
//! }
//! # assert_eq!(describe(&AutovizError::EmptyInput), "check the file");
//! ```

use crate::analyser::logic::types::ColumnKind;
use thiserror::Error;

/// Main error type for autoviz operations.
#[derive(Debug, Error)]
pub enum AutovizError {
    /// The input is not well-formed delimited text.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The input has a header but no data rows (or no header at all).
    #[error("Empty input: the file contains no data rows")]
    EmptyInput,

    /// A selected column does not exist, or a required axis was not selected.
    #[error("Invalid axis: {0}")]
    InvalidAxis(String),

    /// A selected column has a kind the requested operation cannot use.
    #[error("Type mismatch: column '{column}' is {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: ColumnKind,
    },

    /// Fewer paired observations than the fit needs.
    #[error("Insufficient data: {found} valid paired observations, at least {required} required")]
    InsufficientData { found: usize, required: usize },

    /// The regressor has zero variance.
    #[error("Degenerate input: column '{0}' has zero variance")]
    DegenerateInput(String),

    /// Sums over a column overflow `f64`, so no fit can be computed.
    #[error("Numeric overflow: values in column '{0}' are too large to fit")]
    NumericOverflow(String),

    /// The active dataset was not loaded from a file and cannot be re-read.
    #[error("No source file: the active dataset was not loaded from a file")]
    NoSource,

    /// No dataset has been loaded into the workspace yet.
    #[error("No dataset loaded")]
    NoDataset,

    /// I/O errors while reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AutovizError {
    pub(crate) fn type_mismatch(
        column: &str,
        expected: impl Into<String>,
        actual: ColumnKind,
    ) -> Self {
        Self::TypeMismatch {
            column: column.to_owned(),
            expected: expected.into(),
            actual,
        }
    }
}

impl From<csv::Error> for AutovizError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(csv::Position::line);
        match line {
            Some(line) => Self::Parse(format!("line {line}: {err}")),
            None => Self::Parse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AutovizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

/// Result type alias for autoviz operations.
pub type Result<T> = std::result::Result<T, AutovizError>;

/// Extension trait to add context to I/O and configuration failures.
///
/// Typed analysis failures pass through untouched so callers can still match
/// on them.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AutovizError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| add_context(e.into(), msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| add_context(e.into(), f()))
    }
}

fn add_context(err: AutovizError, msg: String) -> AutovizError {
    match err {
        AutovizError::Io(e) => AutovizError::Io(std::io::Error::new(e.kind(), format!("{msg}: {e}"))),
        AutovizError::Config(inner) => AutovizError::Config(format!("{msg}: {inner}")),
        AutovizError::Parse(inner) => AutovizError::Parse(format!("{msg}: {inner}")),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AutovizError::InvalidAxis("column 'Region' not found".to_owned());
        assert_eq!(err.to_string(), "Invalid axis: column 'Region' not found");

        let err = AutovizError::type_mismatch("Department", "Numeric", ColumnKind::Categorical);
        assert_eq!(
            err.to_string(),
            "Type mismatch: column 'Department' is Categorical, expected Numeric"
        );
    }

    #[test]
    fn test_overflow_is_not_reported_as_zero_variance() {
        let err = AutovizError::NumericOverflow("x".to_owned());
        assert!(err.to_string().contains("overflow"));
        assert!(!err.to_string().contains("zero variance"));
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "sales.csv",
        ));

        let err = result.context("Failed to read file").unwrap_err();
        assert!(matches!(err, AutovizError::Io(_)));
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_context_keeps_typed_variants() {
        let result: Result<()> = Err(AutovizError::DegenerateInput("x".to_owned()));
        let err = result.context("regression").unwrap_err();
        assert!(matches!(err, AutovizError::DegenerateInput(_)));
    }
}
