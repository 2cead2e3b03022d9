//! High-level pipeline: archives in, three cleaned CSV tables out.
//!
//! # Example
//!
//! ```rust,ignore
//! use campaign_clean::{run, PipelineConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run(&PipelineConfig::new("files/input", "files/output"))?;
//!     println!("Cleaned {} rows", report.input_rows);
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument, warn};

use super::projection::{CampaignTables, CampaignTransformer, TransformOptions};
use crate::archive::{load_dir, EntrySummary};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{DataQualityIssue, RawRecord};
use crate::writer::{write_tables, WrittenTables};

/// Issues logged individually before the rest are only counted.
const MAX_LOGGED_ISSUES: usize = 5;

/// Outcome of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Archives read, in processing order
    pub archives: Vec<PathBuf>,

    /// CSV entries read from those archives
    pub entries: Vec<EntrySummary>,

    /// Rows in the merged input
    pub input_rows: usize,

    pub client_rows: usize,
    pub campaign_rows: usize,
    pub economics_rows: usize,

    /// Files written
    pub outputs: WrittenTables,

    /// Non-fatal findings, in input order
    pub issues: Vec<DataQualityIssue>,
}

/// Run the whole pipeline described by `config`.
///
/// 1. Load and concatenate every CSV entry of every archive in the input directory
/// 2. Transform the merged rows into the three tables
/// 3. Write the tables to the output directory
///
/// Nothing is written unless every step before it succeeded.
#[instrument(level = "info", skip(config), fields(input = %config.input_dir.display(), output = %config.output_dir.display()))]
pub fn run(config: &PipelineConfig) -> PipelineResult<RunReport> {
    let input = load_dir(&config.input_dir)?;
    if input.archives.is_empty() {
        return Err(PipelineError::NoArchives(config.input_dir.clone()));
    }
    if input.records.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    info!(
        archives = input.archives.len(),
        entries = input.entries.len(),
        rows = input.records.len(),
        "loaded input"
    );

    let tables = transform_records(&input.records, config.transform_options())?;
    let outputs = write_tables(&config.output_dir, &tables)?;

    Ok(RunReport {
        archives: input.archives,
        entries: input.entries,
        input_rows: input.records.len(),
        client_rows: tables.client.len(),
        campaign_rows: tables.campaign.len(),
        economics_rows: tables.economics.len(),
        outputs,
        issues: tables.issues,
    })
}

/// Transform already-loaded rows and log what was found.
pub fn transform_records(
    records: &[RawRecord],
    options: TransformOptions,
) -> PipelineResult<CampaignTables> {
    if records.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let tables = CampaignTransformer::new(options).transform(records)?;
    info!("{}", tables.summary());
    log_issues(&tables.issues);

    Ok(tables)
}

fn log_issues(issues: &[DataQualityIssue]) {
    if issues.is_empty() {
        return;
    }
    warn!(count = issues.len(), "data-quality issues found");
    for issue in issues.iter().take(MAX_LOGGED_ISSUES) {
        warn!("{}", issue);
    }
    if issues.len() > MAX_LOGGED_ISSUES {
        warn!("... +{} more", issues.len() - MAX_LOGGED_ISSUES);
    }
}
