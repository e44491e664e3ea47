//! Feature derivation rules shared by the aggregation stage and the predictor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::columns::dataset;

/// Days a book may be held before its return counts as late.
pub const RETURN_LIMIT_DAYS: i32 = 28;

/// Dataset columns encoded as integer category codes.
pub const CATEGORICAL_FEATURES: [&str; 4] = [
    dataset::GENDER,
    dataset::EDUCATION,
    dataset::OCCUPATION,
    dataset::AGE_CATEGORY,
];

/// Dataset columns fed to the model, in model input order.
pub const MODEL_FEATURES: [&str; 6] = [
    dataset::GENDER,
    dataset::EDUCATION,
    dataset::OCCUPATION,
    dataset::AGE_CATEGORY,
    dataset::PRICE_STANDARDIZED,
    dataset::PAGES_STANDARDIZED,
];

/// Customer age bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeCategory {
    Young,
    Adult,
    MiddleAge,
    Old,
    Undefined,
}

impl AgeCategory {
    /// Buckets with inclusive age bounds, youngest first.
    pub const BUCKETS: [(AgeCategory, i32, i32); 4] = [
        (AgeCategory::Young, 3, 19),
        (AgeCategory::Adult, 20, 39),
        (AgeCategory::MiddleAge, 40, 59),
        (AgeCategory::Old, 60, 99),
    ];

    /// Bucket for an age in whole years. Ages outside every bucket, and
    /// unknown ages, are `Undefined`.
    pub fn from_age(age: Option<i32>) -> Self {
        let Some(age) = age else {
            return AgeCategory::Undefined;
        };
        Self::BUCKETS
            .iter()
            .find(|(_, low, high)| (*low..=*high).contains(&age))
            .map_or(AgeCategory::Undefined, |(category, _, _)| *category)
    }

    /// Label stored in the `age_category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeCategory::Young => "Young",
            AgeCategory::Adult => "Adult",
            AgeCategory::MiddleAge => "Middle-Age",
            AgeCategory::Old => "Old",
            AgeCategory::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a checkout, used as the model label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnLabel {
    /// Returned within [`RETURN_LIMIT_DAYS`].
    OnTime,
    /// Returned after the limit, or not returned yet.
    Late,
    /// Returned before it was checked out, or returned with an unknown
    /// checkout date; excluded from the dataset.
    Invalid,
}

impl ReturnLabel {
    /// Label for a checkout given whether the book came back and the days
    /// between checkout and return.
    ///
    /// A returned book with no holding period (unknown checkout date) is
    /// `Invalid`.
    pub fn from_holding(returned: bool, days: Option<i32>) -> Self {
        match (returned, days) {
            (false, _) => ReturnLabel::Late,
            (true, None) => ReturnLabel::Invalid,
            (true, Some(days)) if days < 0 => ReturnLabel::Invalid,
            (true, Some(days)) if days <= RETURN_LIMIT_DAYS => ReturnLabel::OnTime,
            (true, Some(_)) => ReturnLabel::Late,
        }
    }

    /// Numeric value in the `label` column.
    pub fn code(&self) -> i32 {
        match self {
            ReturnLabel::OnTime => 1,
            ReturnLabel::Late => 0,
            ReturnLabel::Invalid => -1,
        }
    }
}
