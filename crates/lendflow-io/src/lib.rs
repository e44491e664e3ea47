//! Table storage drivers.
//!
//! Readers and writers are selected by name from configuration through
//! [`reader_by_name`] / [`writer_by_name`]:
//!
//! | Name            | Type                   |
//! |-----------------|------------------------|
//! | `CsvReader`     | [`CsvTableReader`]     |
//! | `ParquetReader` | [`ParquetTableReader`] |
//! | `CsvWriter`     | [`CsvTableWriter`]     |
//! | `ParquetWriter` | [`ParquetTableWriter`] |
//!
//! # Example
//!
//! ```ignore
//! use lendflow_io::{TableLocation, reader_by_name, writer_by_name};
//!
//! let reader = reader_by_name("CsvReader")?;
//! let mut df = reader.read(&TableLocation::new("raw/books.csv"))?;
//! let writer = writer_by_name("ParquetWriter")?;
//! writer.write(&mut df, &TableLocation::new("bronze/books.parquet"))?;
//! ```

mod csv;
mod error;
mod location;
mod parquet;
mod partition;
mod registry;

pub use csv::{CsvTableReader, CsvTableWriter, validate_encoding};
pub use error::{IoError, Result};
pub use location::TableLocation;
pub use parquet::{ParquetTableReader, ParquetTableWriter, list_parquet_files};
pub use partition::NULL_PARTITION;
pub use registry::{READER_NAMES, WRITER_NAMES, reader_by_name, writer_by_name};

use polars::prelude::DataFrame;

/// Loads a whole table from storage.
pub trait TableReader {
    fn read(&self, location: &TableLocation) -> Result<DataFrame>;
}

/// Persists a whole table, replacing what was previously stored at the location.
pub trait TableWriter {
    fn write(&self, data: &mut DataFrame, location: &TableLocation) -> Result<()>;
}
