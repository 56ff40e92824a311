#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loads raw tick sighting sources into the canonical [`Dataset`].
//!
//! Loading is a three-step pipeline run once at startup:
//!
//! 1. Read every row of the source ([`source`]).
//! 2. Drop rows missing `id`, `date` or `location` ([`clean::record_from_row`]).
//! 3. Drop later rows that repeat an earlier `id` ([`clean::dedupe`]).
//!
//! Source order is preserved throughout.

pub mod clean;
pub mod source;

use std::path::Path;

use tick_sightings_sighting_models::{Dataset, RecordId};

/// A raw source row keyed by column name.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// Errors that can occur while loading a source.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error (file open/read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is not a supported source format.
    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    /// The source parsed but does not have the expected shape.
    #[error("Malformed source: {message}")]
    Malformed {
        /// Description of what went wrong.
        message: String,
    },
}

/// What happened to the rows of a source during loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows read from the source.
    pub total_rows: usize,
    /// Rows dropped for missing `id`, `date` or `location`.
    pub missing_fields: usize,
    /// Ids of rows dropped as duplicates, one entry per dropped row.
    pub duplicates: Vec<RecordId>,
    /// Rows in the resulting dataset.
    pub retained: usize,
}

/// Loads the source file at `path` into the canonical dataset.
///
/// # Errors
///
/// Returns [`IngestError`] if the source cannot be read or parsed. The
/// caller should treat this as fatal.
pub fn load_dataset(path: &Path) -> Result<(Dataset, LoadReport), IngestError> {
    log::info!("Loading tick sightings from {}", path.display());
    let rows = source::read_rows(path)?;
    Ok(build_dataset(rows))
}

/// Cleans and deduplicates already-read rows into the canonical dataset.
#[must_use]
pub fn build_dataset(rows: Vec<RawRow>) -> (Dataset, LoadReport) {
    let total_rows = rows.len();

    let cleaned: Vec<_> = rows.into_iter().filter_map(clean::record_from_row).collect();

    let missing_fields = total_rows - cleaned.len();
    if missing_fields > 0 {
        log::info!("Removed {missing_fields} rows with missing date or location");
    } else {
        log::info!("All rows loaded.");
    }

    let (records, duplicates) = clean::dedupe(cleaned);
    if !duplicates.is_empty() {
        log::info!("Removed {} duplicate rows", duplicates.len());
    }
    log::info!("Total rows after deduplication: {}", records.len());

    let report = LoadReport {
        total_rows,
        missing_fields,
        duplicates,
        retained: records.len(),
    };

    (Dataset::from_records(records), report)
}
