//! Data model for the library-checkout pipeline.
//!
//! - [`entity`]: the four source entities and their primary keys
//! - [`columns`]: canonical (snake_case) column names per table
//! - [`schema`]: nominal output schemas enforced after transformation
//! - [`features`]: age buckets, return labels and model feature columns

pub mod columns;
pub mod entity;
pub mod features;
pub mod schema;

pub use entity::Entity;
pub use features::{
    AgeCategory, CATEGORICAL_FEATURES, MODEL_FEATURES, RETURN_LIMIT_DAYS, ReturnLabel,
};
pub use schema::TableSchema;
