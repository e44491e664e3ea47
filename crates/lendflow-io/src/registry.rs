//! Name-based registry of readers and writers.
//!
//! Configuration refers to drivers by name; names are resolved once when a
//! job is built.

use crate::csv::{CsvTableReader, CsvTableWriter};
use crate::error::{IoError, Result};
use crate::parquet::{ParquetTableReader, ParquetTableWriter};
use crate::{TableReader, TableWriter};

/// Registered reader names.
pub const READER_NAMES: [&str; 2] = ["CsvReader", "ParquetReader"];

/// Registered writer names.
pub const WRITER_NAMES: [&str; 2] = ["CsvWriter", "ParquetWriter"];

/// Resolves a configured reader name.
pub fn reader_by_name(name: &str) -> Result<Box<dyn TableReader>> {
    match name.trim() {
        "CsvReader" => Ok(Box::new(CsvTableReader)),
        "ParquetReader" => Ok(Box::new(ParquetTableReader)),
        other => Err(IoError::MissingImplementation {
            kind: "reader",
            name: other.to_string(),
        }),
    }
}

/// Resolves a configured writer name.
pub fn writer_by_name(name: &str) -> Result<Box<dyn TableWriter>> {
    match name.trim() {
        "CsvWriter" => Ok(Box::new(CsvTableWriter)),
        "ParquetWriter" => Ok(Box::new(ParquetTableWriter)),
        other => Err(IoError::MissingImplementation {
            kind: "writer",
            name: other.to_string(),
        }),
    }
}
