//! Tests for entity metadata and feature rules.

use lendflow_model::{AgeCategory, Entity, ReturnLabel, TableSchema};
use polars::prelude::DataType;

#[test]
fn age_bucket_boundaries() {
    assert_eq!(AgeCategory::from_age(Some(19)), AgeCategory::Young);
    assert_eq!(AgeCategory::from_age(Some(20)), AgeCategory::Adult);
    assert_eq!(AgeCategory::from_age(Some(59)), AgeCategory::MiddleAge);
    assert_eq!(AgeCategory::from_age(Some(60)), AgeCategory::Old);
    assert_eq!(AgeCategory::from_age(Some(2)), AgeCategory::Undefined);
    assert_eq!(AgeCategory::from_age(Some(100)), AgeCategory::Undefined);
    assert_eq!(AgeCategory::from_age(None), AgeCategory::Undefined);
}

#[test]
fn age_category_labels() {
    assert_eq!(AgeCategory::MiddleAge.as_str(), "Middle-Age");
    assert_eq!(AgeCategory::Young.to_string(), "Young");
}

#[test]
fn return_label_from_holding() {
    assert_eq!(ReturnLabel::from_holding(true, Some(14)), ReturnLabel::OnTime);
    assert_eq!(ReturnLabel::from_holding(true, Some(0)), ReturnLabel::OnTime);
    assert_eq!(ReturnLabel::from_holding(true, Some(28)), ReturnLabel::OnTime);
    assert_eq!(ReturnLabel::from_holding(true, Some(29)), ReturnLabel::Late);
    assert_eq!(ReturnLabel::from_holding(false, None), ReturnLabel::Late);
    assert_eq!(ReturnLabel::from_holding(true, Some(-14)), ReturnLabel::Invalid);
    assert_eq!(ReturnLabel::Invalid.code(), -1);
}

#[test]
fn returned_with_unknown_checkout_is_invalid() {
    assert_eq!(ReturnLabel::from_holding(true, None), ReturnLabel::Invalid);
}

#[test]
fn entity_parsing_accepts_plural_forms() {
    assert_eq!("books".parse::<Entity>().unwrap(), Entity::Book);
    assert_eq!(" Customer ".parse::<Entity>().unwrap(), Entity::Customer);
    assert!("patrons".parse::<Entity>().is_err());
}

#[test]
fn checkout_has_composite_key() {
    assert_eq!(
        Entity::Checkout.primary_key(),
        &["id", "patron_id", "library_id"]
    );
    assert_eq!(Entity::Library.primary_key(), &["id"]);
}

#[test]
fn library_postal_code_is_string() {
    let schema = TableSchema::library();
    assert_eq!(schema.dtype("postal_code"), Some(&DataType::String));
}

#[test]
fn dataset_schema_order() {
    let schema = TableSchema::dataset();
    assert_eq!(
        schema.names(),
        vec![
            "customer_id",
            "book_id",
            "name",
            "gender",
            "education",
            "occupation",
            "age_category",
            "price_standardized",
            "pages_standardized",
            "label",
        ]
    );
    assert_eq!(schema.to_polars().len(), 10);
}

#[test]
fn entity_serializes_lowercase() {
    let json = serde_json::to_string(&Entity::Library).unwrap();
    assert_eq!(json, "\"library\"");
}
