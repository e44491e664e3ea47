//! CSV table driver.
//!
//! Raw extracts are read with every column as `String` so the cleaning rules
//! of the transformation stage see the source text untouched.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IoError, Result};
use crate::location::TableLocation;
use crate::partition::{create_output_file, write_table};
use crate::{TableReader, TableWriter};

/// Reads a CSV file with a single header row.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvTableReader;

impl TableReader for CsvTableReader {
    fn read(&self, location: &TableLocation) -> Result<DataFrame> {
        let path = location.path.as_path();
        validate_encoding(path)?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| IoError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .finish()
            .map_err(|e| IoError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "read csv table"
        );
        Ok(df)
    }
}

/// Writes a table as CSV with a header row.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvTableWriter;

impl TableWriter for CsvTableWriter {
    fn write(&self, data: &mut DataFrame, location: &TableLocation) -> Result<()> {
        write_table(data, location, "csv", |part, path| {
            let mut file = create_output_file(path)?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(part)
                .map_err(|e| IoError::Encode {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
        })
    }
}

/// Rejects UTF-16 encoded files, which Polars would parse as garbage.
///
/// A UTF-8 BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IoError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IoError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IoError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_keeps_values_as_strings() {
        let file = create_temp_csv(b"id,price,pages\nb1, $12.50 ,300\nb2,8,120\n");
        let df = CsvTableReader
            .read(&TableLocation::new(file.path()))
            .unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("pages").unwrap().dtype(), &DataType::String);
        let prices = df.column("price").unwrap().str().unwrap();
        assert_eq!(prices.get(0), Some(" $12.50 "));
    }

    #[test]
    fn test_missing_file() {
        let result = CsvTableReader.read(&TableLocation::new("/nonexistent/books.csv"));
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'i', 0, b'd', 0]);
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IoError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }
}
