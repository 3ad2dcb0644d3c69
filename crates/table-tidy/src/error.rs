//! Custom error types for table loading and cleaning.
//!
//! This module provides the error hierarchy using `thiserror`. Only the loader
//! produces user-facing failures; the cleaning stages are total over
//! well-formed tables.
//!
//! Errors are serializable so a collaborator can report them as JSON.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for loading and cleaning tables.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// No supported encoding/delimiter combination produced a rectangular table.
    #[error("Could not parse input as a delimited table: {0}")]
    UnparsableInput(#[source] Box<CleaningError>),

    /// The input held no non-blank lines.
    #[error("Input contains no data")]
    EmptyInput,

    /// The bytes are not valid in the attempted encoding.
    #[error("Invalid {encoding} input: {message}")]
    Encoding {
        encoding: &'static str,
        message: String,
    },

    /// A column's length disagrees with the rest of the table.
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Column was not found in the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for callers that branch on the failure kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnparsableInput(_) => "UNPARSABLE_INPUT",
            Self::EmptyInput => "EMPTY_INPUT",
            Self::Encoding { .. } => "ENCODING_ERROR",
            Self::ShapeMismatch { .. } => "SHAPE_MISMATCH",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error should be reported to the client as bad input
    /// rather than as a server-side failure.
    pub fn is_user_facing(&self) -> bool {
        match self {
            Self::UnparsableInput(_) | Self::EmptyInput => true,
            Self::WithContext { source, .. } => source.is_user_facing(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for loading and cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}
