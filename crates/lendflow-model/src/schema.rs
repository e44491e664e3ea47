//! Nominal output schemas.
//!
//! Each transformed table is cast to its schema before it is written; a value
//! that cannot be converted fails the run.

use polars::prelude::{DataType, Field, Schema};

use crate::columns::{book, category_codes, checkout, customer, dataset, library};
use crate::entity::Entity;

/// Ordered column names and types of an output table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    name: &'static str,
    fields: Vec<(&'static str, DataType)>,
}

impl TableSchema {
    fn new(name: &'static str, fields: Vec<(&'static str, DataType)>) -> Self {
        Self { name, fields }
    }

    /// Silver-layer schema for an entity.
    pub fn for_entity(entity: Entity) -> Self {
        match entity {
            Entity::Book => Self::book(),
            Entity::Customer => Self::customer(),
            Entity::Checkout => Self::checkout(),
            Entity::Library => Self::library(),
        }
    }

    pub fn book() -> Self {
        let list_of_strings = DataType::List(Box::new(DataType::String));
        Self::new(
            "book",
            vec![
                (book::ID, DataType::String),
                (book::TITLE, DataType::String),
                (book::AUTHORS, list_of_strings.clone()),
                (book::PUBLISHER, DataType::String),
                (book::PUBLISHED_DATE, DataType::String),
                (book::PUBLISHED_YEAR, DataType::Int32),
                (book::CATEGORIES, list_of_strings),
                (book::PRICE, DataType::Float32),
                (book::PAGES, DataType::Int32),
            ],
        )
    }

    pub fn customer() -> Self {
        Self::new(
            "customer",
            vec![
                (customer::ID, DataType::String),
                (customer::NAME, DataType::String),
                (customer::STREET_ADDRESS, DataType::String),
                (customer::CITY, DataType::String),
                (customer::STATE, DataType::String),
                (customer::ZIPCODE, DataType::Int32),
                (customer::BIRTH_DATE, DataType::Date),
                (customer::GENDER, DataType::String),
                (customer::EDUCATION, DataType::String),
                (customer::OCCUPATION, DataType::String),
            ],
        )
    }

    pub fn checkout() -> Self {
        Self::new(
            "checkout",
            vec![
                (checkout::ID, DataType::String),
                (checkout::PATRON_ID, DataType::String),
                (checkout::LIBRARY_ID, DataType::String),
                (checkout::DATE_CHECKOUT, DataType::Date),
                (checkout::DATE_RETURNED, DataType::Date),
            ],
        )
    }

    /// Postal codes stay strings: several regional formats are alphanumeric.
    pub fn library() -> Self {
        Self::new(
            "library",
            vec![
                (library::ID, DataType::String),
                (library::NAME, DataType::String),
                (library::STREET_ADDRESS, DataType::String),
                (library::CITY, DataType::String),
                (library::REGION, DataType::String),
                (library::POSTAL_CODE, DataType::String),
            ],
        )
    }

    /// Gold-layer feature dataset.
    pub fn dataset() -> Self {
        Self::new(
            "dataset",
            vec![
                (dataset::CUSTOMER_ID, DataType::String),
                (dataset::BOOK_ID, DataType::String),
                (dataset::NAME, DataType::String),
                (dataset::GENDER, DataType::UInt32),
                (dataset::EDUCATION, DataType::UInt32),
                (dataset::OCCUPATION, DataType::UInt32),
                (dataset::AGE_CATEGORY, DataType::UInt32),
                (dataset::PRICE_STANDARDIZED, DataType::Float32),
                (dataset::PAGES_STANDARDIZED, DataType::Float32),
                (dataset::LABEL, DataType::UInt32),
            ],
        )
    }

    /// Persisted mapping from categorical values to integer codes.
    pub fn category_codes() -> Self {
        Self::new(
            "category_codes",
            vec![
                (category_codes::FEATURE, DataType::String),
                (category_codes::CATEGORY, DataType::String),
                (category_codes::CODE, DataType::UInt32),
            ],
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[(&'static str, DataType)] {
        &self.fields
    }

    /// Column names in output order.
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    pub fn dtype(&self, column: &str) -> Option<&DataType> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, dtype)| dtype)
    }

    /// Converts to a Polars [`Schema`].
    pub fn to_polars(&self) -> Schema {
        Schema::from_iter(
            self.fields
                .iter()
                .map(|(name, dtype)| Field::new((*name).into(), dtype.clone())),
        )
    }
}
