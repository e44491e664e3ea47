//! Storage location of a table.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a table lives and how it is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLocation {
    /// File path, or directory path for partitioned output.
    pub path: PathBuf,
    /// Hive-style partition columns. Empty writes a single file.
    #[serde(default)]
    pub partition_by: Vec<String>,
}

impl TableLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            partition_by: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_partition_by<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partition_by = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_partitioned(&self) -> bool {
        !self.partition_by.is_empty()
    }

    /// Resolves a relative path against `base`.
    #[must_use]
    pub fn resolved(mut self, base: &Path) -> Self {
        if self.path.is_relative() {
            self.path = base.join(&self.path);
        }
        self
    }
}
