//! Canonical column names.
//!
//! Names are the snake_case form produced by the ingestion normalizer.

/// Provenance column added to every bronze table.
pub const INGESTION_DATE: &str = "ingestion_date";

pub mod book {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const AUTHORS: &str = "authors";
    pub const PUBLISHER: &str = "publisher";
    pub const PUBLISHED_DATE: &str = "published_date";
    pub const PUBLISHED_YEAR: &str = "published_year";
    pub const CATEGORIES: &str = "categories";
    pub const PRICE: &str = "price";
    pub const PAGES: &str = "pages";
}

pub mod customer {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const STREET_ADDRESS: &str = "street_address";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const ZIPCODE: &str = "zipcode";
    pub const BIRTH_DATE: &str = "birth_date";
    pub const GENDER: &str = "gender";
    pub const EDUCATION: &str = "education";
    pub const OCCUPATION: &str = "occupation";
    /// Derived during aggregation.
    pub const AGE: &str = "age";
    /// Derived during aggregation.
    pub const AGE_CATEGORY: &str = "age_category";
}

pub mod checkout {
    /// Identifier of the checked-out book.
    pub const ID: &str = "id";
    pub const PATRON_ID: &str = "patron_id";
    pub const LIBRARY_ID: &str = "library_id";
    pub const DATE_CHECKOUT: &str = "date_checkout";
    pub const DATE_RETURNED: &str = "date_returned";
    /// Derived during aggregation.
    pub const DAYS_HOLDING: &str = "days_holding";
}

pub mod library {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const STREET_ADDRESS: &str = "street_address";
    pub const CITY: &str = "city";
    pub const REGION: &str = "region";
    pub const POSTAL_CODE: &str = "postal_code";
}

pub mod dataset {
    pub const CUSTOMER_ID: &str = "customer_id";
    pub const BOOK_ID: &str = "book_id";
    pub const NAME: &str = "name";
    pub const GENDER: &str = "gender";
    pub const EDUCATION: &str = "education";
    pub const OCCUPATION: &str = "occupation";
    pub const AGE_CATEGORY: &str = "age_category";
    pub const PRICE_STANDARDIZED: &str = "price_standardized";
    pub const PAGES_STANDARDIZED: &str = "pages_standardized";
    pub const LABEL: &str = "label";
}

/// Columns of the persisted category code table.
pub mod category_codes {
    pub const FEATURE: &str = "feature";
    pub const CATEGORY: &str = "category";
    pub const CODE: &str = "code";
}
