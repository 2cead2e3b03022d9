//! Serialize the cleaned tables to comma-delimited UTF-8 CSV files.
//!
//! All three tables are rendered in memory before the output directory is
//! touched, so a serialization failure leaves prior outputs intact.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::{WriteError, WriteResult};
use crate::transform::CampaignTables;

pub const CLIENT_FILE: &str = "client.csv";
pub const CAMPAIGN_FILE: &str = "campaign.csv";
pub const ECONOMICS_FILE: &str = "economics.csv";

/// Paths of the files produced by [`write_tables`].
#[derive(Debug, Clone, Serialize)]
pub struct WrittenTables {
    pub client: PathBuf,
    pub campaign: PathBuf,
    pub economics: PathBuf,
}

/// Render rows as CSV with a header row taken from the struct field names.
pub fn to_csv_bytes<T: Serialize>(table: &'static str, rows: &[T]) -> WriteResult<Vec<u8>> {
    let serialize_err = |source| WriteError::Serialize { table, source };

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).map_err(serialize_err)?;
    }
    writer
        .into_inner()
        .map_err(|e| serialize_err(csv::Error::from(e.into_error())))
}

/// Write `client.csv`, `campaign.csv` and `economics.csv` into `out_dir`.
///
/// Creates the directory if needed and overwrites existing files.
pub fn write_tables(out_dir: &Path, tables: &CampaignTables) -> WriteResult<WrittenTables> {
    let rendered = [
        (CLIENT_FILE, to_csv_bytes("client", &tables.client)?),
        (CAMPAIGN_FILE, to_csv_bytes("campaign", &tables.campaign)?),
        (ECONOMICS_FILE, to_csv_bytes("economics", &tables.economics)?),
    ];

    fs::create_dir_all(out_dir).map_err(|source| WriteError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    for (name, bytes) in &rendered {
        let path = out_dir.join(name);
        fs::write(&path, bytes).map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote table");
    }

    Ok(WrittenTables {
        client: out_dir.join(CLIENT_FILE),
        campaign: out_dir.join(CAMPAIGN_FILE),
        economics: out_dir.join(ECONOMICS_FILE),
    })
}
