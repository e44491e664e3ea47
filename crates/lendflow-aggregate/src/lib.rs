//! Gold-layer dataset assembly.
//!
//! Joins the silver customer, checkout and book tables into one row per
//! (customer, book) checkout, derives the return label and age bucket,
//! encodes categorical columns and standardizes numeric ones.

pub mod codes;
pub mod dataset;
mod error;
pub mod features;
pub mod standardize;

pub use codes::CategoryCodes;
pub use dataset::{DatasetInputs, build_dataset};
pub use error::{AggregateError, Result};
pub use standardize::standardize;
