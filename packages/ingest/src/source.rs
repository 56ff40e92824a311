//! Raw tabular source readers.
//!
//! Every reader returns rows as JSON objects keyed by column name, the same
//! shape regardless of whether the data came from a CSV export or a JSON
//! dump. Typing and validation happen later in [`crate::clean`].

use std::io::Read;
use std::path::Path;

use crate::{IngestError, RawRow};

/// File formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Tab-separated values with a header row.
    Tsv,
    /// A top-level JSON array of objects.
    Json,
}

impl SourceFormat {
    /// Picks the format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedFormat`] if the extension is
    /// missing or unknown.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            _ => Err(IngestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Reads every row of the file at `path`.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be opened, its extension is
/// not supported, or its contents cannot be parsed.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, IngestError> {
    let format = SourceFormat::from_path(path)?;
    let file = std::fs::File::open(path)?;

    match format {
        SourceFormat::Csv => read_delimited(file, b','),
        SourceFormat::Tsv => read_delimited(file, b'\t'),
        SourceFormat::Json => read_json(file),
    }
}

/// Parses delimited text with a header row. Cells are trimmed; short rows
/// get empty strings for the missing columns.
///
/// # Errors
///
/// Returns [`IngestError`] if the input is not valid delimited text or has
/// no header row.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Vec<RawRow>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(IngestError::Malformed {
            message: "source contains no header row".to_owned(),
        });
    }

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;

        let mut row = RawRow::new();
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or("").trim().to_owned();
            row.insert(header.clone(), serde_json::Value::String(value));
        }
        rows.push(row);
    }

    log::debug!("Parsed {} delimited rows", rows.len());

    Ok(rows)
}

/// Parses a JSON array of row objects.
///
/// # Errors
///
/// Returns [`IngestError`] if the input is not JSON, is not an array, or
/// contains a non-object element.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<RawRow>, IngestError> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;

    let serde_json::Value::Array(items) = value else {
        return Err(IngestError::Malformed {
            message: "expected a top-level JSON array of rows".to_owned(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            serde_json::Value::Object(row) => Ok(row),
            other => Err(IngestError::Malformed {
                message: format!("row {i} is not an object: {other}"),
            }),
        })
        .collect()
}
