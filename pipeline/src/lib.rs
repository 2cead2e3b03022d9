//! # Campaign Clean - marketing campaign extract cleaning
//!
//! Reads ZIP-compressed CSV extracts of a marketing campaign dataset and
//! splits them into three cleaned tables: `client`, `campaign` and `economics`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  *.zip dir  │────▶│   Parser    │────▶│  Transform  │────▶│ client.csv   │
//! │ (CSV inside)│     │ (auto-enc)  │     │ (3 splits)  │     │ campaign.csv │
//! └─────────────┘     └─────────────┘     └─────────────┘     │ economics.csv│
//!                                                             └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use campaign_clean::{run, PipelineConfig};
//!
//! let report = run(&PipelineConfig::default()).unwrap();
//! println!("Cleaned {} rows", report.input_rows);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Input and output row types
//! - [`parser`] - CSV parsing with auto-detection
//! - [`archive`] - ZIP discovery and extraction
//! - [`transform`] - Normalization rules, projections, and pipeline
//! - [`writer`] - CSV serialization of the output tables
//! - [`config`] - Pipeline configuration

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Input
pub mod archive;
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod writer;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ArchiveError, CsvError, PipelineError, TransformError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    CampaignRecord, ClientRecord, ContactDate, DataQualityIssue, EconomicsRecord, RawRecord,
    CONTACT_YEAR,
};

// =============================================================================
// Re-exports - Input
// =============================================================================

pub use archive::{find_archives, load_dir, read_archive, EntrySummary, LoadedInput};
pub use parser::{parse_bytes_auto, parse_records, ParseResult, REQUIRED_COLUMNS};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    project_campaign, project_client, project_economics, CampaignTables, CampaignTransformer,
    TransformOptions,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use config::PipelineConfig;
pub use transform::pipeline::{run, transform_records, RunReport};
pub use writer::{write_tables, WrittenTables};
