//! Persisted categorical code table.
//!
//! Codes assigned in one run are reused by later runs, so a model trained on
//! an earlier dataset keeps reading the same integers. New values of a
//! feature get codes after the highest existing one, in lexical order.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;
use tracing::debug;

use lendflow_model::TableSchema;
use lendflow_model::columns::category_codes;
use lendflow_transform::enforce_schema;

use crate::error::{AggregateError, Result};

fn table_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| AggregateError::InvalidCodeTable(format!("missing column '{name}'")))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCodes {
    features: BTreeMap<String, BTreeMap<String, u32>>,
}

impl CategoryCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a table with `feature`, `category` and `code` columns.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let features = table_column(df, category_codes::FEATURE)?.cast(&DataType::String)?;
        let categories = table_column(df, category_codes::CATEGORY)?.cast(&DataType::String)?;
        let codes = table_column(df, category_codes::CODE)?.strict_cast(&DataType::UInt32)?;

        let mut table = Self::new();
        let rows = features
            .str()?
            .into_iter()
            .zip(categories.str()?.into_iter())
            .zip(codes.u32()?.into_iter());
        for ((feature, category), code) in rows {
            let (Some(feature), Some(category), Some(code)) = (feature, category, code) else {
                return Err(AggregateError::InvalidCodeTable("null entry".to_string()));
            };
            let entries = table.features.entry(feature.to_string()).or_default();
            if entries.values().any(|existing| *existing == code) {
                return Err(AggregateError::InvalidCodeTable(format!(
                    "code {code} assigned twice for {feature}"
                )));
            }
            entries.insert(category.to_string(), code);
        }
        Ok(table)
    }

    /// Renders the table sorted by feature, then code.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut features = Vec::new();
        let mut categories = Vec::new();
        let mut codes = Vec::new();
        for (feature, entries) in &self.features {
            let mut by_code: Vec<(&String, &u32)> = entries.iter().collect();
            by_code.sort_by_key(|(_, code)| **code);
            for (category, code) in by_code {
                features.push(feature.clone());
                categories.push(category.clone());
                codes.push(*code);
            }
        }
        let df = DataFrame::new(vec![
            Column::new(category_codes::FEATURE.into(), features),
            Column::new(category_codes::CATEGORY.into(), categories),
            Column::new(category_codes::CODE.into(), codes),
        ])?;
        Ok(enforce_schema(&df, &TableSchema::category_codes())?)
    }

    pub fn code(&self, feature: &str, category: &str) -> Option<u32> {
        self.features.get(feature)?.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.features.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assigns codes to values of `features` not yet in the table.
    ///
    /// Returns the number of codes added.
    pub fn extend_from(&mut self, df: &DataFrame, features: &[&str]) -> Result<usize> {
        let mut added = 0;
        for feature in features {
            let values = df.column(feature)?.cast(&DataType::String)?;
            let distinct: BTreeSet<&str> = values.str()?.into_iter().flatten().collect();
            let entries = self.features.entry((*feature).to_string()).or_default();
            let mut next = entries.values().max().map_or(0, |max| max + 1);
            for value in distinct {
                if entries.contains_key(value) {
                    continue;
                }
                entries.insert(value.to_string(), next);
                debug!(feature, category = value, code = next, "assigned category code");
                next += 1;
                added += 1;
            }
        }
        Ok(added)
    }

    /// Replaces each of `features` with its UInt32 codes.
    pub fn encode(&self, mut df: DataFrame, features: &[&str]) -> Result<DataFrame> {
        for feature in features {
            let values = df.column(feature)?.cast(&DataType::String)?;
            let mut encoded: Vec<Option<u32>> = Vec::with_capacity(values.len());
            for value in values.str()?.into_iter() {
                let code = match value {
                    Some(category) => Some(self.code(feature, category).ok_or_else(|| {
                        AggregateError::UnknownCategory {
                            feature: (*feature).to_string(),
                            category: category.to_string(),
                        }
                    })?),
                    None => None,
                };
                encoded.push(code);
            }
            df.with_column(Series::new((*feature).into(), encoded))?;
        }
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_lexical_order() {
        let df = df! { "gender" => ["male", "female", "male", "other"] }.unwrap();
        let mut codes = CategoryCodes::new();
        assert_eq!(codes.extend_from(&df, &["gender"]).unwrap(), 3);
        assert_eq!(codes.code("gender", "female"), Some(0));
        assert_eq!(codes.code("gender", "male"), Some(1));
        assert_eq!(codes.code("gender", "other"), Some(2));
    }

    #[test]
    fn test_existing_codes_are_kept() {
        let mut codes = CategoryCodes::new();
        codes
            .extend_from(&df! { "gender" => ["male"] }.unwrap(), &["gender"])
            .unwrap();
        let added = codes
            .extend_from(&df! { "gender" => ["female", "male"] }.unwrap(), &["gender"])
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(codes.code("gender", "male"), Some(0));
        assert_eq!(codes.code("gender", "female"), Some(1));
    }

    #[test]
    fn test_frame_round_trip() {
        let mut codes = CategoryCodes::new();
        codes
            .extend_from(
                &df! { "gender" => ["f", "m"], "education" => ["college", "high school"] }.unwrap(),
                &["gender", "education"],
            )
            .unwrap();
        let frame = codes.to_frame().unwrap();
        assert_eq!(frame.height(), 4);
        assert_eq!(CategoryCodes::from_frame(&frame).unwrap(), codes);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let frame = df! {
            "feature" => ["gender", "gender"],
            "category" => ["f", "m"],
            "code" => [0u32, 0u32],
        }
        .unwrap();
        assert!(matches!(
            CategoryCodes::from_frame(&frame),
            Err(AggregateError::InvalidCodeTable(_))
        ));
    }

    #[test]
    fn test_encode_unknown_value() {
        let codes = CategoryCodes::new();
        let df = df! { "gender" => ["f"] }.unwrap();
        assert!(matches!(
            codes.encode(df, &["gender"]),
            Err(AggregateError::UnknownCategory { .. })
        ));
    }
}
