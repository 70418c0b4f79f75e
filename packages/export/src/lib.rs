#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! JSON export of scraped festival records.
//!
//! Records are written as a single pretty-printed JSON array (2-space
//! indentation) encoded as UTF-8. Non-ASCII characters are written as-is,
//! not as `\u` escapes. An existing file at the target path is overwritten.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use festiscrape_festival_models::FestivalRecord;

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "festivals.json";

/// Errors that can occur while writing or reading the export file.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Opening, writing, or flushing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding the JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes `records` to `path`, replacing any existing file.
///
/// No cleanup is attempted on failure; a partially written file may remain.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_festivals(path: &Path, records: &[FestivalRecord]) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    log::debug!("Wrote {} record(s) to {}", records.len(), path.display());
    Ok(())
}

/// Reads records previously written by [`write_festivals`].
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be opened or is not a JSON
/// array of festival records.
pub fn read_festivals(path: &Path) -> Result<Vec<FestivalRecord>, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
