//! Single-file and hive-partitioned output layout.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use lendflow_common::any_to_string;
use polars::prelude::*;

use crate::error::{IoError, Result};
use crate::location::TableLocation;

/// Directory name used for null partition values.
pub const NULL_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

/// Writes `data` at `location`, one file per partition when partition keys
/// are configured.
///
/// Partitioned output replaces the whole target directory; partition key
/// columns are kept inside the files.
pub(crate) fn write_table<F>(
    data: &mut DataFrame,
    location: &TableLocation,
    extension: &str,
    mut encode: F,
) -> Result<()>
where
    F: FnMut(&mut DataFrame, &Path) -> Result<()>,
{
    if !location.is_partitioned() {
        return encode(data, &location.path);
    }

    let root = &location.path;
    if root.exists() {
        fs::remove_dir_all(root).map_err(|e| IoError::FileWrite {
            path: root.clone(),
            source: e,
        })?;
    }

    let parts = data
        .partition_by_stable(location.partition_by.iter().map(String::as_str), true)
        .map_err(|e| IoError::Encode {
            path: root.clone(),
            message: e.to_string(),
        })?;

    for mut part in parts {
        let dir = partition_dir(root, &part, &location.partition_by)?;
        let file = dir.join(format!("part-0.{extension}"));
        encode(&mut part, &file)?;
    }
    Ok(())
}

fn partition_dir(root: &Path, part: &DataFrame, keys: &[String]) -> Result<PathBuf> {
    let mut dir = root.to_path_buf();
    for key in keys {
        let value = part
            .column(key)
            .and_then(|column| column.get(0))
            .map_err(|e| IoError::Encode {
                path: root.to_path_buf(),
                message: e.to_string(),
            })?;
        let value = match value {
            AnyValue::Null => NULL_PARTITION.to_string(),
            value => any_to_string(value),
        };
        dir.push(format!("{key}={value}"));
    }
    Ok(dir)
}

/// Creates `path` and its parent directories.
pub(crate) fn create_output_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| IoError::FileWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    File::create(path).map_err(|e| IoError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
