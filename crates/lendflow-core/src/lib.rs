//! Pipeline orchestration.
//!
//! - [`settings`]: TOML settings with per-job sections
//! - [`jobs`]: ingestion, transformation and dataset jobs
//! - [`predict`]: feature lookup and model application
//!
//! All jobs return [`PipelineError`].

mod error;
pub mod jobs;
pub mod predict;
pub mod settings;

pub use error::{PipelineError, Result};
pub use jobs::{JobReport, Stage, create_dataset, ingest, ingest_all, transform, transform_all};
pub use predict::{FeatureRow, LinearModel, Prediction, lookup_features, predict};
pub use settings::{AggregationConfig, JobConfig, ModelConfig, Settings};
