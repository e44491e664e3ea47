//! Column name normalization and ingestion date stamping.

use std::sync::LazyLock;

use chrono::NaiveDate;
use lendflow_common::epoch_days;
use lendflow_model::columns::INGESTION_DATE;
use polars::prelude::*;
use regex::Regex;

static CAMEL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+([A-Z][a-z]+)*$").expect("valid camelCase pattern"));

/// True when the whole name is lower camelCase (`publishedDate`, `id`).
pub fn is_camel_case(name: &str) -> bool {
    CAMEL_CASE.is_match(name)
}

/// Converts a raw column name to its canonical form.
///
/// camelCase names get an underscore before every uppercase letter; anything
/// else is only lowercased.
///
/// # Examples
///
/// ```
/// use lendflow_ingest::to_snake_case;
///
/// assert_eq!(to_snake_case("publishedDate"), "published_date");
/// assert_eq!(to_snake_case("PrIceS"), "prices");
/// assert_eq!(to_snake_case("snake_case_column"), "snake_case_column");
/// ```
pub fn to_snake_case(name: &str) -> String {
    if !is_camel_case(name) {
        return name.to_lowercase();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Renames every column of `df` with [`to_snake_case`].
pub fn normalize_column_names(df: &mut DataFrame) -> PolarsResult<()> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| to_snake_case(name.as_str()))
        .collect();
    df.set_column_names(names)
}

/// Adds the `ingestion_date` column set to `date` for every row.
pub fn stamp_ingestion_date(df: &mut DataFrame, date: NaiveDate) -> PolarsResult<()> {
    let days = vec![epoch_days(date); df.height()];
    let column = Series::new(INGESTION_DATE.into(), days).cast(&DataType::Date)?;
    df.with_column(column)?;
    Ok(())
}

/// Renames columns and stamps the ingestion date.
pub fn normalize(mut df: DataFrame, ingestion_date: NaiveDate) -> PolarsResult<DataFrame> {
    normalize_column_names(&mut df)?;
    stamp_ingestion_date(&mut df, ingestion_date)?;
    tracing::debug!(
        rows = df.height(),
        columns = df.width(),
        %ingestion_date,
        "normalized raw table"
    );
    Ok(df)
}
