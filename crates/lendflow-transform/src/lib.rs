//! Silver-layer transformation.
//!
//! This crate turns bronze tables into typed silver tables:
//!
//! - **cleaning**: value-level string rules (title-casing, lenient dates, numbers)
//! - **columns**: applies cleaning rules to whole DataFrame columns
//! - **dedupe**: primary-key deduplication, last-seen row wins
//! - **schema**: strict cast to the nominal output schema
//! - **window**: ingestion-date filtering of bronze input
//! - **entities**: one [`EntityTransformer`] per source entity

pub mod cleaning;
pub mod columns;
pub mod dedupe;
pub mod entities;
mod error;
pub mod schema;
pub mod window;

pub use dedupe::dedupe_last_by_keys;
pub use entities::{
    BookTransformer, CheckoutTransformer, CustomerTransformer, EntityTransformer,
    LibraryTransformer, transformer_for,
};
pub use error::{Result, TransformError};
pub use schema::enforce_schema;
pub use window::IngestionWindow;
