//! Transformation module.
//!
//! - Operations: text rewrites, binary recoding, month lookup
//! - Projection: the client / campaign / economics split
//! - Pipeline: load archives, transform, write tables

pub mod operations;
pub mod pipeline;
pub mod projection;

pub use operations::{apply_all, binary, parse_month, Operation, MONTH_ABBREVIATIONS};
pub use projection::{
    contact_date, project_campaign, project_client, project_economics, CampaignTables,
    CampaignTransformer, TransformOptions,
};
