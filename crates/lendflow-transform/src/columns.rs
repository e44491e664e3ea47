//! Column-level application of the cleaning rules.
//!
//! Each function replaces one column of the frame in place. The source column
//! is read as text; a missing column is an error.

use chrono::NaiveDate;
use polars::prelude::*;

use lendflow_common::epoch_days;

use crate::error::{Result, TransformError};

/// Reads a column as text, casting it to String when the bronze file stored
/// another type.
fn text_column(df: &DataFrame, column: &str) -> Result<StringChunked> {
    let source = df
        .column(column)
        .map_err(|_| TransformError::MissingColumn {
            column: column.to_string(),
        })?
        .cast(&DataType::String)?;
    Ok(source.str()?.clone())
}

/// Replaces a String column with `f` applied to each non-null value.
///
/// `f` returning `None` produces a null.
pub fn map_text<F>(df: &mut DataFrame, column: &str, f: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let values = text_column(df, column)?;
    let mut builder = StringChunkedBuilder::new(column.into(), df.height());
    for value in values.into_iter() {
        match value.and_then(&f) {
            Some(cleaned) => builder.append_value(cleaned),
            None => builder.append_null(),
        }
    }
    df.with_column(builder.finish().into_series())?;
    Ok(())
}

/// Writes `target` as an Int32 column derived from the text of `source`.
pub fn map_int(
    df: &mut DataFrame,
    source: &str,
    target: &str,
    f: impl Fn(&str) -> Option<i32>,
) -> Result<()> {
    let values: Vec<Option<i32>> = text_column(df, source)?
        .into_iter()
        .map(|value| value.and_then(&f))
        .collect();
    df.with_column(Series::new(target.into(), values))?;
    Ok(())
}

/// Replaces a column with Float32 values parsed from its text.
pub fn map_float(df: &mut DataFrame, column: &str, f: impl Fn(&str) -> Option<f32>) -> Result<()> {
    let values: Vec<Option<f32>> = text_column(df, column)?
        .into_iter()
        .map(|value| value.and_then(&f))
        .collect();
    df.with_column(Series::new(column.into(), values))?;
    Ok(())
}

/// Replaces a column with Date values parsed from its text.
pub fn map_date(
    df: &mut DataFrame,
    column: &str,
    f: impl Fn(&str) -> Option<NaiveDate>,
) -> Result<()> {
    let days: Vec<Option<i32>> = text_column(df, column)?
        .into_iter()
        .map(|value| value.and_then(&f).map(epoch_days))
        .collect();
    let dates = Series::new(column.into(), days).cast(&DataType::Date)?;
    df.with_column(dates)?;
    Ok(())
}

/// Replaces a column with single-element string lists produced by `f`.
pub fn map_singleton_list(
    df: &mut DataFrame,
    column: &str,
    f: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    let lists: ListChunked = text_column(df, column)?
        .into_iter()
        .map(|value| {
            value
                .and_then(&f)
                .map(|token| Series::new(PlSmallStr::EMPTY, vec![token]))
        })
        .collect();
    let lists = lists
        .with_name(column.into())
        .into_series()
        .cast(&DataType::List(Box::new(DataType::String)))?;
    df.with_column(lists)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cleaning::{first_quoted_token, parse_lenient_date, title_case_words};

    #[test]
    fn test_map_text_keeps_nulls() {
        let mut df = df! { "title" => [Some(" the HOBBIT "), None] }.unwrap();
        map_text(&mut df, "title", |value| Some(title_case_words(value))).unwrap();
        let titles = df.column("title").unwrap().str().unwrap();
        assert_eq!(titles.get(0), Some("The Hobbit"));
        assert_eq!(titles.get(1), None);
    }

    #[test]
    fn test_map_text_missing_column() {
        let mut df = df! { "id" => ["1"] }.unwrap();
        let err = map_text(&mut df, "title", |value| Some(value.to_string())).unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn { column } if column == "title"));
    }

    #[test]
    fn test_map_int_adds_target_column() {
        let mut df = df! { "published_date" => ["2004-07-01", "n/a"] }.unwrap();
        map_int(&mut df, "published_date", "published_year", crate::cleaning::parse_year)
            .unwrap();
        let years = df.column("published_year").unwrap().i32().unwrap();
        assert_eq!(years.get(0), Some(2004));
        assert_eq!(years.get(1), None);
        assert!(df.column("published_date").is_ok());
    }

    #[test]
    fn test_map_date_produces_date_dtype() {
        let mut df = df! { "date_checkout" => ["2022-01-01", "garbage"] }.unwrap();
        map_date(&mut df, "date_checkout", parse_lenient_date).unwrap();
        let column = df.column("date_checkout").unwrap();
        assert_eq!(column.dtype(), &DataType::Date);
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_map_singleton_list() {
        let mut df = df! { "authors" => ["['Ursula K. Le Guin', 'Other']", "none"] }.unwrap();
        map_singleton_list(&mut df, "authors", first_quoted_token).unwrap();
        let column = df.column("authors").unwrap();
        assert_eq!(column.dtype(), &DataType::List(Box::new(DataType::String)));
        let lists = column.list().unwrap();
        let first = lists.get_as_series(0).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first.str().unwrap().get(0), Some("Ursula K. Le Guin"));
        assert!(lists.get_as_series(1).is_none());
    }
}
