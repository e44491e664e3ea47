//! Transformation errors.

use chrono::NaiveDate;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while cleaning or typing a table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column the rules operate on is absent from the input.
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// A column could not be converted to its nominal type.
    #[error("cannot cast {entity}.{column} to its schema type: {message}")]
    SchemaCast {
        entity: String,
        column: String,
        message: String,
    },

    /// Only one bound of the ingestion window was given.
    #[error("ingestion window needs both a start and an end date")]
    IncompleteWindow,

    /// The ingestion window is empty.
    #[error("ingestion window start {start} is not before end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
