//! Error types for the campaign cleaning pipeline.
//!
//! The hierarchy follows the pipeline stages:
//!
//! - [`CsvError`] - decoding and parsing one CSV payload
//! - [`ArchiveError`] - locating and extracting ZIP archives
//! - [`TransformError`] - empty input and strict-mode recoding failures
//! - [`WriteError`] - serializing and persisting output tables
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Each lower-level error converts into [`PipelineError`] through `From`,
//! so `?` works across stage boundaries.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors while decoding and parsing a CSV payload.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Bytes could not be decoded with the detected encoding.
    #[error("Failed to decode '{source_name}' as {encoding}")]
    Encoding {
        source_name: String,
        encoding: String,
    },

    /// The payload is not valid CSV.
    #[error("Invalid CSV in '{source_name}': {message}")]
    Malformed {
        source_name: String,
        message: String,
    },

    /// The payload has no header line.
    #[error("CSV '{source_name}' is empty")]
    EmptyFile { source_name: String },

    /// A required column is absent from the header, or a row is too short to carry it.
    #[error("Missing field '{field}' in '{source_name}' at line {line}")]
    MissingField {
        source_name: String,
        line: u64,
        field: &'static str,
    },

    /// A numeric column holds a value that does not parse.
    #[error("Invalid value for '{field}' in '{source_name}' at line {line}: '{value}'")]
    InvalidValue {
        source_name: String,
        line: u64,
        field: &'static str,
        value: String,
    },
}

// =============================================================================
// Archive Errors
// =============================================================================

/// Errors while locating and extracting input archives.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Filesystem error on the input directory or an archive file.
    #[error("Archive IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a readable ZIP container.
    #[error("Invalid ZIP archive '{}': {source}", path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry inside the archive failed to parse.
    #[error(transparent)]
    Csv(#[from] CsvError),
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors raised while projecting raw records.
///
/// Outside of strict mode, only empty input fails.
#[derive(Debug, Error)]
pub enum TransformError {
    /// No rows to transform.
    #[error("No records to transform")]
    EmptyInput,

    /// A month token outside the twelve recognized abbreviations.
    #[error("Unrecognized month '{value}' for client {client_id} (row {row})")]
    UnrecognizedMonth {
        row: usize,
        client_id: i64,
        value: String,
    },
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while serializing or persisting output tables.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create the output directory or write a file.
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a table row.
    #[error("Failed to serialize table '{table}': {source}")]
    Serialize {
        table: &'static str,
        #[source]
        source: csv::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input loading error.
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Output error.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// The input directory contains no ZIP archive.
    #[error("No .zip archives found in '{}'", .0.display())]
    NoArchives(PathBuf),

    /// Archives were found but held no data rows.
    #[error("No records to transform")]
    EmptyInput,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for write operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
