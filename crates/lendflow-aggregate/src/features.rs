//! Derived feature expressions.

use chrono::NaiveDate;
use polars::prelude::*;

use lendflow_common::epoch_days;
use lendflow_model::columns::{book, checkout, customer, dataset};
use lendflow_model::{AgeCategory, RETURN_LIMIT_DAYS, ReturnLabel};

const DAYS_PER_YEAR: i32 = 365;

fn day_number(column: &str) -> Expr {
    col(column).cast(DataType::Int32)
}

/// Whole years between `birth_date` and `today`, counted as 365-day years.
pub fn age(today: NaiveDate) -> Expr {
    (lit(epoch_days(today)) - day_number(customer::BIRTH_DATE))
        .floor_div(lit(DAYS_PER_YEAR))
        .cast(DataType::Int32)
        .alias(customer::AGE)
}

/// Replaces null ages with the median age.
pub fn age_filled() -> Expr {
    col(customer::AGE)
        .fill_null(col(customer::AGE).median())
        .cast(DataType::Int32)
        .alias(customer::AGE)
}

/// Bucket label of `age`; ages outside every bucket are `Undefined`.
pub fn age_category() -> Expr {
    AgeCategory::BUCKETS
        .iter()
        .rev()
        .fold(
            lit(AgeCategory::Undefined.as_str()),
            |otherwise, (category, low, high)| {
                when(
                    col(customer::AGE)
                        .gt_eq(lit(*low))
                        .and(col(customer::AGE).lt_eq(lit(*high))),
                )
                .then(lit(category.as_str()))
                .otherwise(otherwise)
            },
        )
        .alias(customer::AGE_CATEGORY)
}

/// Replaces null prices with the median price.
pub fn price_filled() -> Expr {
    col(book::PRICE)
        .fill_null(col(book::PRICE).median())
        .alias(book::PRICE)
}

/// Days between checkout and return; null when not returned.
pub fn days_holding() -> Expr {
    (day_number(checkout::DATE_RETURNED) - day_number(checkout::DATE_CHECKOUT))
        .alias(checkout::DAYS_HOLDING)
}

/// Return label computed from `days_holding`.
///
/// Mirrors [`ReturnLabel::from_holding`]: late when never returned, invalid
/// when returned before checkout or with no checkout date, on time within
/// [`RETURN_LIMIT_DAYS`], late otherwise.
pub fn label() -> Expr {
    let days = col(checkout::DAYS_HOLDING);
    when(col(checkout::DATE_RETURNED).is_null())
        .then(lit(ReturnLabel::Late.code()))
        .when(days.clone().is_null().or(days.clone().lt(lit(0))))
        .then(lit(ReturnLabel::Invalid.code()))
        .when(days.lt_eq(lit(RETURN_LIMIT_DAYS)))
        .then(lit(ReturnLabel::OnTime.code()))
        .otherwise(lit(ReturnLabel::Late.code()))
        .cast(DataType::Int32)
        .alias(dataset::LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(name: &str, values: &[Option<NaiveDate>]) -> Column {
        let days: Vec<Option<i32>> = values.iter().map(|d| d.map(epoch_days)).collect();
        Series::new(name.into(), days)
            .cast(&DataType::Date)
            .unwrap()
            .into()
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn labels_for(checked_out: &[Option<NaiveDate>], returned: &[Option<NaiveDate>]) -> DataFrame {
        DataFrame::new(vec![
            dates(checkout::DATE_CHECKOUT, checked_out),
            dates(checkout::DATE_RETURNED, returned),
        ])
        .unwrap()
        .lazy()
        .with_column(days_holding())
        .with_column(label())
        .collect()
        .unwrap()
    }

    #[test]
    fn test_label_cases() {
        let labelled = labels_for(
            &[ymd(2022, 1, 1), ymd(2022, 1, 1), ymd(2022, 1, 1), ymd(2022, 1, 15), None, None],
            &[ymd(2022, 1, 15), ymd(2022, 3, 1), None, ymd(2022, 1, 1), ymd(2022, 1, 15), None],
        );
        let labels: Vec<Option<i32>> = labelled
            .column(dataset::LABEL)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            labels,
            vec![Some(1), Some(0), Some(0), Some(-1), Some(-1), Some(0)]
        );
    }

    #[test]
    fn test_label_matches_return_label_rule() {
        let checked_out = [ymd(2022, 1, 1), ymd(2022, 1, 10), None, ymd(2022, 2, 1), None];
        let returned = [ymd(2022, 1, 29), ymd(2022, 1, 9), ymd(2022, 1, 3), None, None];
        let labelled = labels_for(&checked_out, &returned);
        let days = labelled.column(checkout::DAYS_HOLDING).unwrap().i32().unwrap().clone();
        let labels = labelled.column(dataset::LABEL).unwrap().i32().unwrap().clone();
        for idx in 0..labelled.height() {
            let expected = ReturnLabel::from_holding(returned[idx].is_some(), days.get(idx));
            assert_eq!(labels.get(idx), Some(expected.code()), "row {idx}");
        }
    }

    #[test]
    fn test_label_limit_is_inclusive() {
        let labelled = labels_for(
            &[ymd(2022, 1, 1), ymd(2022, 1, 1)],
            &[ymd(2022, 1, 29), ymd(2022, 1, 30)],
        );
        let labels = labelled.column(dataset::LABEL).unwrap().i32().unwrap().clone();
        assert_eq!(labels.get(0), Some(1));
        assert_eq!(labels.get(1), Some(0));
    }

    #[test]
    fn test_age_buckets() {
        let ages = [Some(19), Some(20), Some(59), Some(60), Some(2), Some(100), None];
        let df = df! { customer::AGE => ages }.unwrap();
        let bucketed = df.lazy().with_column(age_category()).collect().unwrap();
        let categories: Vec<Option<&str>> = bucketed
            .column(customer::AGE_CATEGORY)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            categories,
            vec![
                Some("Young"),
                Some("Adult"),
                Some("Middle-Age"),
                Some("Old"),
                Some("Undefined"),
                Some("Undefined"),
                Some("Undefined"),
            ]
        );
        for (age, category) in ages.iter().zip(categories) {
            assert_eq!(category, Some(AgeCategory::from_age(*age).as_str()), "age {age:?}");
        }
    }

    #[test]
    fn test_age_counts_365_day_years() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let df = DataFrame::new(vec![dates(
            customer::BIRTH_DATE,
            &[ymd(2000, 6, 1), ymd(2005, 6, 1), None],
        )])
        .unwrap();
        let aged = df.lazy().with_column(age(today)).collect().unwrap();
        let ages: Vec<Option<i32>> = aged
            .column(customer::AGE)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ages, vec![Some(24), Some(19), None]);
    }
}
