//! Subcommand handlers.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use lendflow_common::today_utc;
use lendflow_core::{
    JobReport, Prediction, Settings, create_dataset, ingest_all, predict, transform_all,
};
use lendflow_transform::IngestionWindow;

use crate::cli::{ConfigArgs, PredictArgs, ProcessArgs};

fn load_settings(path: &Path) -> Result<Settings> {
    Settings::load(path).with_context(|| format!("load settings {}", path.display()))
}

pub fn run_ingest(args: &ConfigArgs) -> Result<Vec<JobReport>> {
    let settings = load_settings(&args.config_path)?;
    let today = today_utc();
    info!(ingestion_date = %today, "starting ingestion");
    ingest_all(&settings, today).context("ingestion")
}

pub fn run_process(args: &ProcessArgs) -> Result<Vec<JobReport>> {
    let window = IngestionWindow::from_bounds(args.start_date, args.end_date)
        .context("ingestion window")?;
    let settings = load_settings(&args.config.config_path)?;
    transform_all(&settings, window.as_ref()).context("transformation")
}

pub fn run_create_dataset(args: &ConfigArgs) -> Result<Vec<JobReport>> {
    let settings = load_settings(&args.config_path)?;
    let report = create_dataset(&settings, today_utc()).context("dataset creation")?;
    Ok(vec![report])
}

pub fn run_predict(args: &PredictArgs) -> Result<Prediction> {
    let settings = load_settings(&args.config.config_path)?;
    predict(&settings, &args.customer_id, &args.book_id).context("prediction")
}
