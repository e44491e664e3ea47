//! Pipeline settings.
//!
//! Settings are read from a TOML file. Relative data paths resolve against
//! `data_dir`, which itself resolves against the directory holding the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use lendflow_io::TableLocation;
use lendflow_model::Entity;

use crate::error::{PipelineError, Result};

/// Section name of the dataset job under `[aggregation]`.
pub const DATASET_SECTION: &str = "dataset";

/// Reader, writer and locations of one single-input job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobConfig {
    pub reader: String,
    pub writer: String,
    pub input: TableLocation,
    pub output: TableLocation,
}

/// Silver inputs of the dataset job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetInputConfig {
    pub book: TableLocation,
    pub customer: TableLocation,
    pub checkout: TableLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AggregationConfig {
    pub reader: String,
    pub writer: String,
    pub input: DatasetInputConfig,
    pub output: TableLocation,
    /// Category code table shared between runs.
    #[serde(default)]
    pub categories: Option<TableLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelConfig {
    pub path: PathBuf,
    /// Expected hex SHA-256 digest of the artifact.
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    ingestion: BTreeMap<String, JobConfig>,
    #[serde(default)]
    transformation: BTreeMap<String, JobConfig>,
    #[serde(default)]
    aggregation: BTreeMap<String, AggregationConfig>,
    #[serde(default)]
    model: Option<ModelConfig>,
    #[serde(skip)]
    config_dir: PathBuf,
}

impl Settings {
    /// Reads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| PipelineError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let settings = Self::from_toml(&text, config_dir).map_err(|err| match err {
            PipelineError::Config { message, .. } => PipelineError::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        debug!(
            path = %path.display(),
            data_dir = %settings.data_dir().display(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Parses settings text; `config_dir` anchors relative paths.
    pub fn from_toml(text: &str, config_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut settings: Settings = toml::from_str(text).map_err(|err| PipelineError::Config {
            path: PathBuf::new(),
            message: err.to_string(),
        })?;
        settings.config_dir = config_dir.into();
        Ok(settings)
    }

    /// Base directory of relative data paths.
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.config_dir.join(dir),
            None => self.config_dir.clone(),
        }
    }

    fn resolve(&self, location: &TableLocation) -> TableLocation {
        location.clone().resolved(&self.data_dir())
    }

    fn resolve_job(&self, job: &JobConfig) -> JobConfig {
        JobConfig {
            reader: job.reader.clone(),
            writer: job.writer.clone(),
            input: self.resolve(&job.input),
            output: self.resolve(&job.output),
        }
    }

    /// Entities with an `[ingestion.<entity>]` section, in processing order.
    pub fn ingestion_entities(&self) -> Result<Vec<Entity>> {
        self.configured_entities("ingestion", self.ingestion.keys())
    }

    /// Entities with a `[transformation.<entity>]` section, in processing order.
    pub fn transformation_entities(&self) -> Result<Vec<Entity>> {
        self.configured_entities("transformation", self.transformation.keys())
    }

    fn configured_entities<'a>(
        &self,
        stage: &str,
        keys: impl Iterator<Item = &'a String>,
    ) -> Result<Vec<Entity>> {
        let mut entities = keys
            .map(|key| {
                key.parse::<Entity>().map_err(|message| PipelineError::Config {
                    path: self.config_dir.clone(),
                    message: format!("[{stage}.{key}]: {message}"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if entities.is_empty() {
            return Err(PipelineError::MissingConfigSection {
                section: stage.to_string(),
            });
        }
        entities.sort();
        entities.dedup();
        Ok(entities)
    }

    /// `[ingestion.<entity>]`, with resolved paths.
    pub fn ingestion(&self, entity: Entity) -> Result<JobConfig> {
        self.ingestion
            .get(entity.as_str())
            .map(|job| self.resolve_job(job))
            .ok_or_else(|| missing_section("ingestion", entity.as_str()))
    }

    /// `[transformation.<entity>]`, with resolved paths.
    pub fn transformation(&self, entity: Entity) -> Result<JobConfig> {
        self.transformation
            .get(entity.as_str())
            .map(|job| self.resolve_job(job))
            .ok_or_else(|| missing_section("transformation", entity.as_str()))
    }

    /// `[aggregation.dataset]`, with resolved paths.
    pub fn aggregation(&self) -> Result<AggregationConfig> {
        let job = self
            .aggregation
            .get(DATASET_SECTION)
            .ok_or_else(|| missing_section("aggregation", DATASET_SECTION))?;
        Ok(AggregationConfig {
            reader: job.reader.clone(),
            writer: job.writer.clone(),
            input: DatasetInputConfig {
                book: self.resolve(&job.input.book),
                customer: self.resolve(&job.input.customer),
                checkout: self.resolve(&job.input.checkout),
            },
            output: self.resolve(&job.output),
            categories: job.categories.as_ref().map(|codes| self.resolve(codes)),
        })
    }

    /// `[model]`, with the artifact path resolved.
    pub fn model(&self) -> Result<ModelConfig> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| PipelineError::MissingConfigSection {
                section: "model".to_string(),
            })?;
        let path = if model.path.is_relative() {
            self.data_dir().join(&model.path)
        } else {
            model.path.clone()
        };
        Ok(ModelConfig {
            path,
            sha256: model.sha256.clone(),
        })
    }
}

fn missing_section(stage: &str, name: &str) -> PipelineError {
    PipelineError::MissingConfigSection {
        section: format!("{stage}.{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
data_dir = "data"

[ingestion.book]
reader = "CsvReader"
writer = "ParquetWriter"
input = { path = "raw/books.csv" }
output = { path = "bronze/books", partition_by = ["ingestion_date"] }

[aggregation.dataset]
reader = "ParquetReader"
writer = "ParquetWriter"
output = { path = "/srv/gold/dataset.parquet" }

[aggregation.dataset.input]
book = { path = "silver/books.parquet" }
customer = { path = "silver/customers.parquet" }
checkout = { path = "silver/checkouts.parquet" }

[model]
path = "models/model.json"
"#;

    fn sample() -> Settings {
        Settings::from_toml(SAMPLE, "/etc/lendflow").unwrap()
    }

    #[test]
    fn test_paths_resolve_against_data_dir() {
        let job = sample().ingestion(Entity::Book).unwrap();
        assert_eq!(job.input.path, PathBuf::from("/etc/lendflow/data/raw/books.csv"));
        assert_eq!(job.output.partition_by, vec!["ingestion_date".to_string()]);
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let job = sample().aggregation().unwrap();
        assert_eq!(job.output.path, PathBuf::from("/srv/gold/dataset.parquet"));
        assert_eq!(
            job.input.book.path,
            PathBuf::from("/etc/lendflow/data/silver/books.parquet")
        );
        assert!(job.categories.is_none());
    }

    #[test]
    fn test_missing_section_uses_dotted_name() {
        let err = sample().transformation(Entity::Checkout).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing configuration section [transformation.checkout]"
        );
    }

    #[test]
    fn test_data_dir_defaults_to_config_dir() {
        let settings = Settings::from_toml("", "/etc/lendflow").unwrap();
        assert_eq!(settings.data_dir(), PathBuf::from("/etc/lendflow"));
        assert!(matches!(
            settings.model(),
            Err(PipelineError::MissingConfigSection { .. })
        ));
    }

    #[test]
    fn test_configured_entities() {
        assert_eq!(sample().ingestion_entities().unwrap(), vec![Entity::Book]);
        assert!(matches!(
            sample().transformation_entities(),
            Err(PipelineError::MissingConfigSection { ref section }) if section == "transformation"
        ));
    }

    #[test]
    fn test_unknown_entity_section() {
        let text = r#"
[ingestion.magazine]
reader = "CsvReader"
writer = "CsvWriter"
input = { path = "raw/magazines.csv" }
output = { path = "bronze/magazines.csv" }
"#;
        let settings = Settings::from_toml(text, ".").unwrap();
        assert!(matches!(
            settings.ingestion_entities(),
            Err(PipelineError::Config { .. })
        ));
    }

    #[test]
    fn test_malformed_settings() {
        let err = Settings::from_toml("[ingestion.book]\nreader = 3", ".").unwrap_err();
        assert!(matches!(err, PipelineError::Config { .. }));
    }
}
