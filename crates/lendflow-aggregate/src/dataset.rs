//! Dataset assembly.

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, info, warn};

use lendflow_model::columns::{book, checkout, customer, dataset};
use lendflow_model::{CATEGORICAL_FEATURES, ReturnLabel, TableSchema};
use lendflow_transform::enforce_schema;

use crate::codes::CategoryCodes;
use crate::error::Result;
use crate::features;
use crate::standardize::standardize;

/// Silver tables joined into the dataset.
#[derive(Debug, Clone)]
pub struct DatasetInputs {
    pub book: DataFrame,
    pub customer: DataFrame,
    pub checkout: DataFrame,
}

/// Customers with age bucket, keyed by `patron_id`.
///
/// The bucket comes from the unfilled age, so an unknown birth date stays
/// `Undefined`.
fn customers(df: DataFrame, today: NaiveDate) -> LazyFrame {
    df.lazy()
        .with_column(features::age(today))
        .with_column(features::age_category())
        .with_column(features::age_filled())
        .select([
            col(customer::ID).alias(checkout::PATRON_ID),
            col(customer::NAME),
            col(customer::GENDER),
            col(customer::EDUCATION),
            col(customer::OCCUPATION),
            col(customer::AGE_CATEGORY),
        ])
}

fn checkouts(df: DataFrame) -> LazyFrame {
    df.lazy()
        .with_column(features::days_holding())
        .with_column(features::label())
        .select([
            col(checkout::ID),
            col(checkout::PATRON_ID),
            col(dataset::LABEL),
        ])
}

fn books(df: DataFrame) -> LazyFrame {
    df.lazy()
        .with_column(features::price_filled())
        .select([col(book::ID), col(book::PRICE), col(book::PAGES)])
}

/// Builds the model dataset.
///
/// Customers are inner-joined to their checkouts and left-joined to the
/// checked-out book. Rows with any null feature and rows with an invalid
/// label are dropped. Categorical columns are encoded with `codes`, which
/// gains a code for every value it has not seen before.
pub fn build_dataset(
    inputs: DatasetInputs,
    today: NaiveDate,
    codes: &mut CategoryCodes,
) -> Result<DataFrame> {
    let DatasetInputs {
        book,
        customer,
        checkout,
    } = inputs;

    let joined = customers(customer, today)
        .inner_join(
            checkouts(checkout),
            col(checkout::PATRON_ID),
            col(checkout::PATRON_ID),
        )
        .left_join(books(book), col(checkout::ID), col(book::ID))
        .select([
            col(checkout::PATRON_ID).alias(dataset::CUSTOMER_ID),
            col(checkout::ID).alias(dataset::BOOK_ID),
            col(dataset::NAME),
            col(dataset::GENDER),
            col(dataset::EDUCATION),
            col(dataset::OCCUPATION),
            col(dataset::AGE_CATEGORY),
            col(book::PRICE),
            col(book::PAGES),
            col(dataset::LABEL),
        ])
        .collect()?;
    let rows_joined = joined.height();

    let labelled = joined
        .lazy()
        .drop_nulls(None)
        .filter(col(dataset::LABEL).neq(lit(ReturnLabel::Invalid.code())))
        .collect()?;
    debug!(
        rows_joined,
        rows_kept = labelled.height(),
        "dropped incomplete and invalid rows"
    );

    let added = codes.extend_from(&labelled, &CATEGORICAL_FEATURES)?;
    if added > 0 {
        info!(added, total = codes.len(), "new category codes assigned");
    }
    let encoded = codes.encode(labelled, &CATEGORICAL_FEATURES)?;

    let standardized = standardize(
        encoded,
        &[
            (book::PRICE, dataset::PRICE_STANDARDIZED),
            (book::PAGES, dataset::PAGES_STANDARDIZED),
        ],
    )?;
    if standardized.height() < 2 {
        warn!(
            rows = standardized.height(),
            "too few rows to standardize, standardized columns are null"
        );
    }

    Ok(enforce_schema(&standardized, &TableSchema::dataset())?)
}
