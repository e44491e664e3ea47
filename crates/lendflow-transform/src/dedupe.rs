use std::collections::HashSet;

use polars::prelude::{AnyValue, BooleanChunked, Column, DataFrame, NewChunkedArray};

use lendflow_common::any_to_string;

use crate::error::{Result, TransformError};

/// Removes rows that repeat a key, keeping the last row seen for each key.
///
/// Surviving rows keep their relative order. Null key parts compare equal to
/// each other.
pub fn dedupe_last_by_keys(df: &DataFrame, keys: &[&str]) -> Result<DataFrame> {
    if df.height() == 0 || keys.is_empty() {
        return Ok(df.clone());
    }
    let key_columns = keys
        .iter()
        .map(|key| {
            df.column(key)
                .cloned()
                .map_err(|_| TransformError::MissingColumn {
                    column: (*key).to_string(),
                })
        })
        .collect::<Result<Vec<Column>>>()?;

    let mut seen = HashSet::new();
    let mut keep = vec![false; df.height()];
    for idx in (0..df.height()).rev() {
        let mut composite = Vec::with_capacity(key_columns.len());
        for column in &key_columns {
            let value = match column.get(idx)? {
                AnyValue::Null => None,
                other => Some(any_to_string(other)),
            };
            composite.push(value);
        }
        keep[idx] = seen.insert(composite);
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    Ok(df.filter(&mask)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_last_seen_row_wins() {
        let df = df! {
            "id" => ["a", "b", "a"],
            "title" => ["first", "other", "second"],
        }
        .unwrap();
        let deduped = dedupe_last_by_keys(&df, &["id"]).unwrap();
        assert_eq!(deduped.height(), 2);
        let titles: Vec<_> = deduped
            .column("title")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(titles, vec!["other", "second"]);
    }

    #[test]
    fn test_composite_key() {
        let df = df! {
            "id" => ["b1", "b1", "b1"],
            "patron_id" => ["p1", "p2", "p1"],
            "library_id" => ["l1", "l1", "l1"],
        }
        .unwrap();
        let deduped = dedupe_last_by_keys(&df, &["id", "patron_id", "library_id"]).unwrap();
        assert_eq!(deduped.height(), 2);
    }

    #[test]
    fn test_null_keys_collapse() {
        let df = df! { "id" => [None, Some("x"), None] }.unwrap();
        let deduped = dedupe_last_by_keys(&df, &["id"]).unwrap();
        assert_eq!(deduped.height(), 2);
    }

    #[test]
    fn test_missing_key_column() {
        let df = df! { "name" => ["x"] }.unwrap();
        assert!(matches!(
            dedupe_last_by_keys(&df, &["id"]),
            Err(TransformError::MissingColumn { .. })
        ));
    }
}
