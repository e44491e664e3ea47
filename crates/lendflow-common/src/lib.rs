//! Shared utilities for lendflow crates.
//!
//! This crate provides common helpers used across the workspace:
//! Polars `AnyValue` conversions and epoch-day date arithmetic.

pub mod dates;
pub mod polars;

pub use dates::{date_from_epoch_days, epoch_days, today_utc};
pub use polars::{any_to_f64, any_to_string, format_numeric, parse_f64};
