//! Unified pipeline error.
//!
//! Every job returns [`PipelineError`]; the binary logs it and exits with a
//! non-zero status.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

use lendflow_aggregate::AggregateError;
use lendflow_io::IoError;
use lendflow_transform::TransformError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A job's section is absent from the settings file.
    #[error("missing configuration section [{section}]")]
    MissingConfigSection { section: String },

    /// A configured reader or writer name is not registered.
    #[error("missing reader or writer implementation '{name}'")]
    MissingImplementation { name: String },

    #[error("cannot cast {entity}.{column}: {message}")]
    SchemaCast {
        entity: String,
        column: String,
        message: String,
    },

    #[error("no dataset row for customer '{customer_id}' and book '{book_id}'")]
    EmptyLookup {
        customer_id: String,
        book_id: String,
    },

    /// The matching dataset row has no value for a model feature, e.g. a
    /// standardized column over fewer than two rows.
    #[error("dataset row for customer '{customer_id}' and book '{book_id}' has no value for '{feature}'")]
    MissingFeature {
        customer_id: String,
        book_id: String,
        feature: String,
    },

    /// Input data could not be loaded.
    #[error("failed to read input: {0}")]
    UpstreamRead(#[source] IoError),

    /// Output data could not be stored.
    #[error("failed to write output: {0}")]
    Write(#[source] IoError),

    #[error("invalid settings {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("invalid model artifact {path}: {message}")]
    Model { path: PathBuf, message: String },

    #[error(transparent)]
    Transform(TransformError),

    #[error(transparent)]
    Aggregate(AggregateError),

    #[error("dataframe operation failed: {0}")]
    Polars(#[from] PolarsError),
}

impl From<IoError> for PipelineError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::MissingImplementation { name, .. } => {
                PipelineError::MissingImplementation { name }
            }
            err if err.is_upstream_read() => PipelineError::UpstreamRead(err),
            err => PipelineError::Write(err),
        }
    }
}

impl From<TransformError> for PipelineError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::SchemaCast {
                entity,
                column,
                message,
            } => PipelineError::SchemaCast {
                entity,
                column,
                message,
            },
            TransformError::Polars(err) => PipelineError::Polars(err),
            err => PipelineError::Transform(err),
        }
    }
}

impl From<AggregateError> for PipelineError {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::Schema(err) => err.into(),
            AggregateError::Polars(err) => PipelineError::Polars(err),
            err => PipelineError::Aggregate(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_are_classified() {
        let missing: PipelineError = IoError::MissingImplementation {
            kind: "writer",
            name: "JsonWriter".to_string(),
        }
        .into();
        assert!(
            matches!(missing, PipelineError::MissingImplementation { ref name } if name == "JsonWriter")
        );

        let not_found: PipelineError = IoError::FileNotFound {
            path: PathBuf::from("raw/books.csv"),
        }
        .into();
        assert!(matches!(not_found, PipelineError::UpstreamRead(_)));
    }

    #[test]
    fn test_schema_cast_surfaces_through_aggregate() {
        let err: PipelineError = AggregateError::Schema(TransformError::SchemaCast {
            entity: "dataset".to_string(),
            column: "label".to_string(),
            message: "negative".to_string(),
        })
        .into();
        assert_eq!(err.to_string(), "cannot cast dataset.label: negative");
    }
}
