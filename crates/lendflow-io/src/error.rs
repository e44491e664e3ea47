//! Error types for table storage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing tables.
#[derive(Debug, Error)]
pub enum IoError {
    // === Upstream Read Errors ===
    /// Input file or directory does not exist.
    #[error("input not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a file or directory.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to decode Parquet with Polars.
    #[error("failed to read Parquet {path}: {message}")]
    ParquetRead { path: PathBuf, message: String },

    /// Partitioned dataset directory holds no Parquet files.
    #[error("no parquet files found under {path}")]
    EmptyDataset { path: PathBuf },

    // === Write Errors ===
    /// Failed to create an output file or directory.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars failed to encode or partition the table.
    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },

    // === Registry Errors ===
    /// No reader or writer is registered under the configured name.
    #[error("missing {kind} implementation '{name}'")]
    MissingImplementation { kind: &'static str, name: String },
}

impl IoError {
    /// True for failures to load input data.
    pub fn is_upstream_read(&self) -> bool {
        matches!(
            self,
            IoError::FileNotFound { .. }
                | IoError::FileRead { .. }
                | IoError::UnsupportedEncoding { .. }
                | IoError::CsvParse { .. }
                | IoError::ParquetRead { .. }
                | IoError::EmptyDataset { .. }
        )
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, IoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/data/raw/books.csv"),
        };
        assert_eq!(err.to_string(), "input not found: /data/raw/books.csv");
    }

    #[test]
    fn test_missing_implementation_display() {
        let err = IoError::MissingImplementation {
            kind: "reader",
            name: "JsonReader".to_string(),
        };
        assert_eq!(err.to_string(), "missing reader implementation 'JsonReader'");
        assert!(!err.is_upstream_read());
    }
}
