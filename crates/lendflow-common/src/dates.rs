//! Epoch-day date conversion.
//!
//! Polars stores `Date` columns as `i32` days since 1970-01-01. Columns are
//! built and compared through this representation so no temporal expression
//! namespace is needed.

use chrono::{NaiveDate, Utc};

/// The Polars `Date` epoch.
pub const EPOCH: NaiveDate = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date");

/// Days since 1970-01-01 for a calendar date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lendflow_common::epoch_days;
///
/// assert_eq!(epoch_days(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
/// ```
pub fn epoch_days(date: NaiveDate) -> i32 {
    // Range of NaiveDate (±262,143 years) always fits in i32 days.
    date.signed_duration_since(EPOCH).num_days() as i32
}

/// Calendar date for a number of days since 1970-01-01.
pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    EPOCH.checked_add_signed(chrono::Duration::days(i64::from(days)))
}

/// Current UTC calendar date.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
