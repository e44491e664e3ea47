//! End-to-end tests of dataset assembly on small silver tables.

use chrono::NaiveDate;
use polars::prelude::*;

use lendflow_aggregate::{CategoryCodes, DatasetInputs, build_dataset};
use lendflow_common::epoch_days;
use lendflow_model::TableSchema;

fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn date_column(name: &str, values: &[Option<NaiveDate>]) -> Column {
    let days: Vec<Option<i32>> = values.iter().map(|d| d.map(epoch_days)).collect();
    Series::new(name.into(), days)
        .cast(&DataType::Date)
        .unwrap()
        .into()
}

fn books() -> DataFrame {
    df! {
        "id" => ["b1", "b2", "b3"],
        "price" => [Some(10.0f32), None, Some(30.0)],
        "pages" => [100i32, 300, 200],
    }
    .unwrap()
}

fn customers(genders: [&str; 2]) -> DataFrame {
    let mut df = df! {
        "id" => ["c1", "c2"],
        "name" => ["Ada Lovelace", "Alan Turing"],
        "gender" => genders,
        "education" => ["College", "Graduate Degree"],
        "occupation" => ["Tech", "Education & Health"],
    }
    .unwrap();
    df.with_column(date_column("birth_date", &[ymd(1990, 1, 1), None]))
        .unwrap();
    df
}

fn checkouts() -> DataFrame {
    let mut df = df! {
        "id" => ["b1", "b2", "b1", "b2", "b3", "b3"],
        "patron_id" => ["c1", "c1", "c2", "c2", "c9", "c1"],
        "library_id" => ["l1", "l1", "l1", "l1", "l1", "l1"],
    }
    .unwrap();
    df.with_column(date_column(
        "date_checkout",
        &[
            ymd(2022, 1, 1),
            ymd(2022, 1, 1),
            ymd(2022, 1, 1),
            ymd(2022, 1, 15),
            ymd(2022, 1, 1),
            None,
        ],
    ))
    .unwrap();
    df.with_column(date_column(
        "date_returned",
        &[
            ymd(2022, 1, 15),
            ymd(2022, 3, 1),
            None,
            ymd(2022, 1, 1),
            ymd(2022, 1, 2),
            ymd(2022, 1, 15),
        ],
    ))
    .unwrap();
    df
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn inputs(genders: [&str; 2]) -> DatasetInputs {
    DatasetInputs {
        book: books(),
        customer: customers(genders),
        checkout: checkouts(),
    }
}

/// (customer_id, book_id, label) rows sorted by ids.
fn labels(df: &DataFrame) -> Vec<(String, String, u32)> {
    let customers = df.column("customer_id").unwrap().str().unwrap().clone();
    let books = df.column("book_id").unwrap().str().unwrap().clone();
    let labels = df.column("label").unwrap().u32().unwrap().clone();
    let mut rows: Vec<(String, String, u32)> = (0..df.height())
        .map(|idx| {
            (
                customers.get(idx).unwrap().to_string(),
                books.get(idx).unwrap().to_string(),
                labels.get(idx).unwrap(),
            )
        })
        .collect();
    rows.sort();
    rows
}

#[test]
fn builds_labelled_rows() {
    let mut codes = CategoryCodes::new();
    let dataset = build_dataset(inputs(["female", "male"]), today(), &mut codes).unwrap();

    let names: Vec<&str> = dataset
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(names, TableSchema::dataset().names());
    assert_eq!(
        labels(&dataset),
        vec![
            ("c1".to_string(), "b1".to_string(), 1),
            ("c1".to_string(), "b2".to_string(), 0),
            ("c2".to_string(), "b1".to_string(), 0),
        ]
    );
    assert_eq!(dataset.column("label").unwrap().dtype(), &DataType::UInt32);
    assert_eq!(dataset.column("gender").unwrap().dtype(), &DataType::UInt32);
}

#[test]
fn excludes_invalid_labels() {
    let mut codes = CategoryCodes::new();
    let dataset = build_dataset(inputs(["female", "male"]), today(), &mut codes).unwrap();

    // c2/b2 came back before checkout and c1/b3 has no checkout date.
    let rows = labels(&dataset);
    assert_eq!(rows.len(), 3);
    assert!(!rows.iter().any(|(c, b, _)| c == "c2" && b == "b2"));
    assert!(!rows.iter().any(|(c, b, _)| c == "c1" && b == "b3"));
}

#[test]
fn unknown_birth_date_is_undefined() {
    let mut codes = CategoryCodes::new();
    let dataset = build_dataset(inputs(["female", "male"]), today(), &mut codes).unwrap();

    // c1 is 34; c2 has no birth date and is bucketed before the median fill.
    assert_eq!(codes.code("age_category", "Adult"), Some(0));
    assert_eq!(codes.code("age_category", "Undefined"), Some(1));
    let customers = dataset.column("customer_id").unwrap().str().unwrap().clone();
    let buckets = dataset.column("age_category").unwrap().u32().unwrap().clone();
    for idx in 0..dataset.height() {
        let expected = if customers.get(idx) == Some("c1") { 0 } else { 1 };
        assert_eq!(buckets.get(idx), Some(expected));
    }
}

#[test]
fn standardizes_price_and_pages() {
    let mut codes = CategoryCodes::new();
    let dataset = build_dataset(inputs(["female", "male"]), today(), &mut codes).unwrap();

    for column in ["price_standardized", "pages_standardized"] {
        let values: Vec<f32> = dataset
            .column(column)
            .unwrap()
            .f32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(values.len(), 3, "{column}");
        let mean = values.iter().sum::<f32>() / values.len() as f32;
        assert!(mean.abs() < 1e-5, "{column} mean {mean}");
    }
}

#[test]
fn category_codes_are_stable_across_runs() {
    let mut codes = CategoryCodes::new();
    build_dataset(inputs(["female", "male"]), today(), &mut codes).unwrap();
    assert_eq!(codes.code("gender", "female"), Some(0));
    assert_eq!(codes.code("gender", "male"), Some(1));

    let mut reloaded = CategoryCodes::from_frame(&codes.to_frame().unwrap()).unwrap();
    let dataset = build_dataset(inputs(["agender", "male"]), today(), &mut reloaded).unwrap();

    assert_eq!(reloaded.code("gender", "female"), Some(0));
    assert_eq!(reloaded.code("gender", "male"), Some(1));
    assert_eq!(reloaded.code("gender", "agender"), Some(2));

    let customers = dataset.column("customer_id").unwrap().str().unwrap().clone();
    let genders = dataset.column("gender").unwrap().u32().unwrap().clone();
    for idx in 0..dataset.height() {
        let expected = if customers.get(idx) == Some("c1") { 2 } else { 1 };
        assert_eq!(genders.get(idx), Some(expected));
    }
}
