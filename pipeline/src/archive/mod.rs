//! Locate ZIP archives in an input directory and extract their CSV entries.
//!
//! Archives are visited in file-name order and entries in archive order, so
//! the merged row order is stable across runs. Rows are concatenated as-is:
//! no deduplication across archives or entries.

use std::fs::{self, File};
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};
use zip::ZipArchive;

use crate::error::{ArchiveError, ArchiveResult};
use crate::models::RawRecord;
use crate::parser::parse_bytes_auto;

/// One CSV entry that was read from an archive.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySummary {
    pub archive: PathBuf,
    pub name: String,
    pub rows: usize,
    pub encoding: String,
    pub delimiter: char,
}

/// Every row found under the input directory.
#[derive(Debug, Clone, Default)]
pub struct LoadedInput {
    pub archives: Vec<PathBuf>,
    pub entries: Vec<EntrySummary>,
    pub records: Vec<RawRecord>,
}

/// List the `.zip` files directly inside `dir`, sorted by name.
pub fn find_archives(dir: &Path) -> ArchiveResult<Vec<PathBuf>> {
    let io_err = |source| ArchiveError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut archives = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_zip = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("zip"));
        if is_zip && path.is_file() {
            archives.push(path);
        }
    }
    archives.sort();
    Ok(archives)
}

/// Read every CSV entry of one archive file.
pub fn read_archive(path: &Path) -> ArchiveResult<Vec<(EntrySummary, Vec<RawRecord>)>> {
    let file = File::open(path).map_err(|source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_archive_from(file, path)
}

/// Read every CSV entry from an already-open archive.
///
/// `path` labels the archive in summaries and errors.
pub fn read_archive_from<R: Read + Seek>(
    reader: R,
    path: &Path,
) -> ArchiveResult<Vec<(EntrySummary, Vec<RawRecord>)>> {
    let zip_err = |source| ArchiveError::Zip {
        path: path.to_path_buf(),
        source,
    };

    let mut archive = ZipArchive::new(reader).map_err(zip_err)?;
    let mut out = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(zip_err)?;
        let name = entry.name().to_string();
        if entry.is_dir() || !name.to_lowercase().ends_with(".csv") {
            debug!(archive = %path.display(), entry = %name, "skipping non-csv entry");
            continue;
        }

        let mut buf = Vec::new();
        entry
            .read_to_end(&mut buf)
            .map_err(|source| ArchiveError::Io {
                path: path.join(&name),
                source,
            })?;

        let source_name = format!("{}:{}", path.display(), name);
        let parsed = parse_bytes_auto(&buf, &source_name)?;
        debug!(entry = %source_name, rows = parsed.records.len(), "parsed entry");

        let summary = EntrySummary {
            archive: path.to_path_buf(),
            name,
            rows: parsed.records.len(),
            encoding: parsed.encoding,
            delimiter: parsed.delimiter,
        };
        out.push((summary, parsed.records));
    }

    Ok(out)
}

/// Load and concatenate the rows of every archive in `dir`.
#[instrument(level = "info", skip(dir), fields(input = %dir.display()))]
pub fn load_dir(dir: &Path) -> ArchiveResult<LoadedInput> {
    let archives = find_archives(dir)?;
    info!(count = archives.len(), "found archives");

    let mut input = LoadedInput::default();
    for path in &archives {
        for (summary, records) in read_archive(path)? {
            info!(archive = %path.display(), entry = %summary.name, rows = summary.rows, "read entry");
            input.entries.push(summary);
            input.records.extend(records);
        }
    }
    input.archives = archives;

    Ok(input)
}
