//! Bronze-layer ingestion.
//!
//! Ingestion does not apply business rules. It renames raw columns to
//! snake_case and stamps every row with the date of the run:
//!
//! ```ignore
//! use lendflow_ingest::normalize;
//!
//! let bronze = normalize(raw, lendflow_common::today_utc())?;
//! ```

mod normalize;

pub use normalize::{is_camel_case, normalize, normalize_column_names, stamp_ingestion_date, to_snake_case};
