//! Structured error types for cleaning operations.
//!
//! Every failure is local and surfaced immediately: an operation that errors
//! leaves its input table unmodified. There is no retry or partial-application
//! machinery anywhere in this crate.

use thiserror::Error;

/// Errors raised by the cleaning operations in [`crate::clean`].
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("column not found: '{column}'")]
    ColumnNotFound { column: String },

    #[error("cannot coerce value '{value}' in column '{column}' to a number")]
    TypeCoercion { column: String, value: String },

    #[error("positional rename expects {expected} names, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("reference column '{column}' has zero observations, nothing to sample")]
    EmptyDistribution { column: String },

    #[error("column name normalization produced duplicate name '{name}'")]
    DuplicateColumnName { name: String },

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}
