//! Parquet table driver.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::error::{IoError, Result};
use crate::location::TableLocation;
use crate::partition::{create_output_file, write_table};
use crate::{TableReader, TableWriter};

/// Reads a Parquet file, or every `.parquet` file below a directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParquetTableReader;

impl TableReader for ParquetTableReader {
    fn read(&self, location: &TableLocation) -> Result<DataFrame> {
        let path = location.path.as_path();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        if path.is_file() {
            return read_parquet_file(path);
        }

        let files = list_parquet_files(path)?;
        let Some((first, rest)) = files.split_first() else {
            return Err(IoError::EmptyDataset {
                path: path.to_path_buf(),
            });
        };

        let mut df = read_parquet_file(first)?;
        for file in rest {
            let part = read_parquet_file(file)?;
            df.vstack_mut(&part).map_err(|e| IoError::ParquetRead {
                path: file.clone(),
                message: e.to_string(),
            })?;
        }

        tracing::debug!(
            path = %path.display(),
            files = files.len(),
            rows = df.height(),
            "read partitioned parquet dataset"
        );
        Ok(df)
    }
}

/// Writes Snappy-compressed Parquet.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParquetTableWriter;

impl TableWriter for ParquetTableWriter {
    fn write(&self, data: &mut DataFrame, location: &TableLocation) -> Result<()> {
        write_table(data, location, "parquet", |part, path| {
            let mut file = create_output_file(path)?;
            ParquetWriter::new(&mut file)
                .with_compression(ParquetCompression::Snappy)
                .finish(part)
                .map(|_| ())
                .map_err(|e| IoError::Encode {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
        })
    }
}

fn read_parquet_file(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| IoError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| IoError::ParquetRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Lists `.parquet` files below `dir` recursively, sorted by path.
pub fn list_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|e| IoError::FileRead {
            path: current.clone(),
            source: e,
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| IoError::FileRead {
                path: current.clone(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"))
            {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
