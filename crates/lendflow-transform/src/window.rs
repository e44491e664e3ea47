//! Ingestion-date window applied to bronze input before transformation.

use chrono::NaiveDate;
use polars::prelude::*;

use lendflow_common::epoch_days;
use lendflow_model::columns::INGESTION_DATE;

use crate::error::{Result, TransformError};

/// Half-open range of ingestion dates, `start <= ingestion_date < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl IngestionWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start >= end {
            return Err(TransformError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a window from optional CLI bounds. No bounds means no window;
    /// a single bound is rejected.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Option<Self>> {
        match (start, end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => Self::new(start, end).map(Some),
            _ => Err(TransformError::IncompleteWindow),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Keeps rows whose ingestion date falls inside the window.
    pub fn apply(&self, df: DataFrame) -> Result<DataFrame> {
        if df.column(INGESTION_DATE).is_err() {
            return Err(TransformError::MissingColumn {
                column: INGESTION_DATE.to_string(),
            });
        }
        let day = col(INGESTION_DATE).cast(DataType::Int32);
        let filtered = df
            .lazy()
            .filter(
                day.clone()
                    .gt_eq(lit(epoch_days(self.start)))
                    .and(day.lt(lit(epoch_days(self.end)))),
            )
            .collect()?;
        Ok(filtered)
    }
}
