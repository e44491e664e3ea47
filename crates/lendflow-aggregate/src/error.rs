use polars::prelude::PolarsError;
use thiserror::Error;

use lendflow_transform::TransformError;

#[derive(Debug, Error)]
pub enum AggregateError {
    /// The persisted category code table is unusable.
    #[error("invalid category code table: {0}")]
    InvalidCodeTable(String),

    /// A categorical value has no code.
    #[error("no code for {feature} value '{category}'")]
    UnknownCategory { feature: String, category: String },

    #[error(transparent)]
    Schema(#[from] TransformError),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, AggregateError>;
