use polars::prelude::*;

use crate::error::Result;

/// Adds a z-score column `target = (source - mean) / std` for each
/// `(source, target)` pair, using the sample standard deviation.
pub fn standardize(df: DataFrame, columns: &[(&str, &str)]) -> Result<DataFrame> {
    let exprs: Vec<Expr> = columns
        .iter()
        .map(|(source, target)| {
            let value = col(*source).cast(DataType::Float64);
            ((value.clone() - value.clone().mean()) / value.std(1)).alias(*target)
        })
        .collect();
    Ok(df.lazy().with_columns(exprs).collect()?)
}
