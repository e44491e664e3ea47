//! Prediction from a stored logistic model.
//!
//! The model artifact is JSON:
//!
//! ```json
//! { "intercept": -0.4, "coefficients": { "gender": 0.2, "price_standardized": -0.7 }, "threshold": 0.5 }
//! ```
//!
//! Features without a coefficient contribute nothing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, info_span, warn};

use lendflow_common::any_to_f64;
use lendflow_model::MODEL_FEATURES;
use lendflow_model::columns::dataset;

use crate::error::{PipelineError, Result};
use crate::jobs::read_table;
use crate::settings::Settings;

fn default_threshold() -> f64 {
    0.5
}

/// Logistic regression over the dataset feature columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    #[serde(default)]
    pub coefficients: BTreeMap<String, f64>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LinearModel {
    /// Loads a model artifact, verifying its SHA-256 digest when one is given.
    pub fn load(path: &Path, expected_sha256: Option<&str>) -> Result<Self> {
        let model_error = |message: String| PipelineError::Model {
            path: path.to_path_buf(),
            message,
        };
        let bytes = std::fs::read(path).map_err(|err| model_error(err.to_string()))?;

        if let Some(expected) = expected_sha256 {
            let actual = hex::encode(Sha256::digest(&bytes));
            let expected = expected.trim().to_lowercase();
            if actual != expected {
                return Err(model_error(format!(
                    "checksum mismatch: expected {expected}, got {actual}"
                )));
            }
            debug!(sha256 = %actual, "model checksum verified");
        }

        let model: LinearModel =
            serde_json::from_slice(&bytes).map_err(|err| model_error(err.to_string()))?;
        for name in model.coefficients.keys() {
            if !MODEL_FEATURES.contains(&name.as_str()) {
                warn!(feature = %name, "model coefficient has no matching dataset column");
            }
        }
        Ok(model)
    }

    /// Probability that the book is returned on time.
    pub fn probability(&self, features: &FeatureRow) -> f64 {
        let score = features
            .values
            .iter()
            .map(|(name, value)| self.coefficients.get(*name).copied().unwrap_or(0.0) * value)
            .fold(self.intercept, |acc, term| acc + term);
        1.0 / (1.0 + (-score).exp())
    }
}

/// Model inputs of one dataset row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub values: Vec<(&'static str, f64)>,
}

impl FeatureRow {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(feature, _)| *feature == name)
            .map(|(_, value)| *value)
    }
}

/// Returns the feature row of the (customer, book) pair.
pub fn lookup_features(df: &DataFrame, customer_id: &str, book_id: &str) -> Result<FeatureRow> {
    let matches = df
        .clone()
        .lazy()
        .filter(
            col(dataset::CUSTOMER_ID)
                .eq(lit(customer_id))
                .and(col(dataset::BOOK_ID).eq(lit(book_id))),
        )
        .collect()?;
    if matches.height() == 0 {
        return Err(PipelineError::EmptyLookup {
            customer_id: customer_id.to_string(),
            book_id: book_id.to_string(),
        });
    }
    if matches.height() > 1 {
        warn!(rows = matches.height(), "several dataset rows match, using the first");
    }

    let mut values = Vec::with_capacity(MODEL_FEATURES.len());
    for feature in MODEL_FEATURES {
        let value = any_to_f64(matches.column(feature)?.get(0)?).ok_or_else(|| {
            PipelineError::MissingFeature {
                customer_id: customer_id.to_string(),
                book_id: book_id.to_string(),
                feature: feature.to_string(),
            }
        })?;
        values.push((feature, value));
    }
    Ok(FeatureRow { values })
}

/// Prediction for one (customer, book) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub customer_id: String,
    pub book_id: String,
    pub probability: f64,
    pub on_time: bool,
    pub model_path: PathBuf,
}

/// Looks up the pair in the gold dataset and applies the configured model.
pub fn predict(settings: &Settings, customer_id: &str, book_id: &str) -> Result<Prediction> {
    let span = info_span!("predict", customer_id, book_id);
    let _guard = span.enter();

    let job = settings.aggregation()?;
    let model_config = settings.model()?;
    let dataset = read_table(&job.reader, &job.output)?;
    let features = lookup_features(&dataset, customer_id, book_id)?;

    let model = LinearModel::load(&model_config.path, model_config.sha256.as_deref())?;
    let probability = model.probability(&features);
    let prediction = Prediction {
        customer_id: customer_id.to_string(),
        book_id: book_id.to_string(),
        probability,
        on_time: probability >= model.threshold,
        model_path: model_config.path,
    };
    info!(
        probability = prediction.probability,
        on_time = prediction.on_time,
        "prediction complete"
    );
    Ok(prediction)
}
