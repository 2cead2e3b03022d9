//! Pipeline configuration.
//!
//! The binary builds a [`PipelineConfig`] from CLI flags and environment
//! variables; library callers construct one directly.

use std::path::PathBuf;

use serde::Serialize;

use crate::transform::TransformOptions;

/// Default directory scanned for `.zip` extracts.
pub const DEFAULT_INPUT_DIR: &str = "files/input";

/// Default directory receiving the cleaned tables.
pub const DEFAULT_OUTPUT_DIR: &str = "files/output";

/// Where to read, where to write, and how strict to be.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Abort on unrecognized month tokens instead of reporting them
    pub strict_months: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            strict_months: false,
        }
    }
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            strict_months: false,
        }
    }

    pub fn with_strict_months(mut self, strict: bool) -> Self {
        self.strict_months = strict;
        self
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            strict_months: self.strict_months,
        }
    }
}
