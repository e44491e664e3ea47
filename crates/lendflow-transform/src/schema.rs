//! Nominal schema enforcement.

use polars::prelude::{Column, DataFrame};
use tracing::debug;

use lendflow_model::TableSchema;

use crate::error::{Result, TransformError};

/// Casts every schema column strictly to its nominal type and returns them in
/// schema order. Columns outside the schema are dropped.
///
/// A missing column, or a value that cannot be converted, is a
/// [`TransformError::SchemaCast`] naming the column.
pub fn enforce_schema(df: &DataFrame, schema: &TableSchema) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(schema.fields().len());
    for (name, dtype) in schema.fields() {
        let cast_error = |message: String| TransformError::SchemaCast {
            entity: schema.name().to_string(),
            column: (*name).to_string(),
            message,
        };
        let column = df
            .column(name)
            .map_err(|_| cast_error("column is missing".to_string()))?;
        let cast = column
            .strict_cast(dtype)
            .map_err(|err| cast_error(err.to_string()))?;
        columns.push(cast);
    }
    let dropped = df.width().saturating_sub(columns.len());
    if dropped > 0 {
        debug!(table = schema.name(), dropped, "dropping columns outside schema");
    }
    Ok(DataFrame::new(columns)?)
}
