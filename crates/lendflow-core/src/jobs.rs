//! Stage jobs.
//!
//! Each job resolves its reader and writer by name, reads its input, runs the
//! stage's pure transformation and writes the result.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use lendflow_aggregate::{CategoryCodes, DatasetInputs, build_dataset};
use lendflow_ingest::normalize;
use lendflow_io::{TableLocation, TableReader, reader_by_name, writer_by_name};
use lendflow_model::Entity;
use lendflow_transform::{IngestionWindow, transformer_for};

use crate::error::Result;
use crate::settings::Settings;

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingestion,
    Transformation,
    Aggregation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Ingestion => "ingestion",
            Stage::Transformation => "transformation",
            Stage::Aggregation => "aggregation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one job.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub stage: Stage,
    /// Entity name, or `dataset`.
    pub name: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub output: PathBuf,
    pub duration: Duration,
}

impl JobReport {
    fn finish(
        stage: Stage,
        name: impl Into<String>,
        rows_in: usize,
        rows_out: usize,
        output: &Path,
        started: Instant,
    ) -> Self {
        let report = Self {
            stage,
            name: name.into(),
            rows_in,
            rows_out,
            output: output.to_path_buf(),
            duration: started.elapsed(),
        };
        info!(
            stage = %report.stage,
            entity = %report.name,
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            path = %report.output.display(),
            duration_ms = report.duration.as_millis(),
            "job complete"
        );
        report
    }
}

/// Normalizes one raw extract into the bronze tier.
pub fn ingest(settings: &Settings, entity: Entity, ingestion_date: NaiveDate) -> Result<JobReport> {
    let span = info_span!("ingest", %entity);
    let _guard = span.enter();
    let started = Instant::now();

    let job = settings.ingestion(entity)?;
    let reader = reader_by_name(&job.reader)?;
    let writer = writer_by_name(&job.writer)?;

    let raw = reader.read(&job.input)?;
    let rows_in = raw.height();
    let mut bronze = normalize(raw, ingestion_date)?;
    writer.write(&mut bronze, &job.output)?;

    Ok(JobReport::finish(
        Stage::Ingestion,
        entity.as_str(),
        rows_in,
        bronze.height(),
        &job.output.path,
        started,
    ))
}

/// Cleans one bronze table into the silver tier.
pub fn transform(
    settings: &Settings,
    entity: Entity,
    window: Option<&IngestionWindow>,
) -> Result<JobReport> {
    let span = info_span!("transform", %entity);
    let _guard = span.enter();
    let started = Instant::now();

    let job = settings.transformation(entity)?;
    let reader = reader_by_name(&job.reader)?;
    let writer = writer_by_name(&job.writer)?;

    let bronze = reader.read(&job.input)?;
    let rows_in = bronze.height();
    let bronze = match window {
        Some(window) => {
            let filtered = window.apply(bronze)?;
            debug!(
                start = %window.start(),
                end = %window.end(),
                rows_in,
                rows_kept = filtered.height(),
                "ingestion window applied"
            );
            filtered
        }
        None => bronze,
    };
    let mut silver = transformer_for(entity).transform(bronze)?;
    writer.write(&mut silver, &job.output)?;

    Ok(JobReport::finish(
        Stage::Transformation,
        entity.as_str(),
        rows_in,
        silver.height(),
        &job.output.path,
        started,
    ))
}

fn load_codes(reader: &dyn TableReader, location: Option<&TableLocation>) -> Result<CategoryCodes> {
    let Some(location) = location else {
        return Ok(CategoryCodes::new());
    };
    if !location.path.exists() {
        debug!(path = %location.path.display(), "no category code table yet");
        return Ok(CategoryCodes::new());
    }
    let table = reader.read(location)?;
    let codes = CategoryCodes::from_frame(&table)?;
    debug!(path = %location.path.display(), codes = codes.len(), "category codes loaded");
    Ok(codes)
}

/// Joins the silver tables into the gold dataset.
///
/// When a category code table is configured it is loaded first and written
/// back with any newly assigned codes.
pub fn create_dataset(settings: &Settings, today: NaiveDate) -> Result<JobReport> {
    let span = info_span!("create_dataset");
    let _guard = span.enter();
    let started = Instant::now();

    let job = settings.aggregation()?;
    let reader = reader_by_name(&job.reader)?;
    let writer = writer_by_name(&job.writer)?;

    let inputs = DatasetInputs {
        book: reader.read(&job.input.book)?,
        customer: reader.read(&job.input.customer)?,
        checkout: reader.read(&job.input.checkout)?,
    };
    let rows_in = inputs.checkout.height();
    let mut codes = load_codes(reader.as_ref(), job.categories.as_ref())?;

    let mut dataset = build_dataset(inputs, today, &mut codes)?;
    writer.write(&mut dataset, &job.output)?;
    if let Some(location) = &job.categories {
        let mut table = codes.to_frame()?;
        writer.write(&mut table, location)?;
    }

    Ok(JobReport::finish(
        Stage::Aggregation,
        "dataset",
        rows_in,
        dataset.height(),
        &job.output.path,
        started,
    ))
}

/// Runs [`ingest`] for every configured entity.
pub fn ingest_all(settings: &Settings, ingestion_date: NaiveDate) -> Result<Vec<JobReport>> {
    settings
        .ingestion_entities()?
        .into_iter()
        .map(|entity| ingest(settings, entity, ingestion_date))
        .collect()
}

/// Runs [`transform`] for every configured entity.
pub fn transform_all(
    settings: &Settings,
    window: Option<&IngestionWindow>,
) -> Result<Vec<JobReport>> {
    settings
        .transformation_entities()?
        .into_iter()
        .map(|entity| transform(settings, entity, window))
        .collect()
}

/// Reads a whole table with the named reader.
pub(crate) fn read_table(reader_name: &str, location: &TableLocation) -> Result<DataFrame> {
    Ok(reader_by_name(reader_name)?.read(location)?)
}
