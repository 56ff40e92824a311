//! Row cleaning: required-field checks, typing, and deduplication.

use std::collections::HashSet;

use tick_sightings_sighting_models::{RecordId, SightingDate, SightingRecord, from_excel_serial};

use crate::RawRow;

/// Column holding the record identifier.
pub const ID_FIELD: &str = "id";
/// Column holding the sighting date.
pub const DATE_FIELD: &str = "date";
/// Column holding the sighting location.
pub const LOCATION_FIELD: &str = "location";

/// Returns `true` if a cell counts as present.
///
/// Null, blank strings, `false` and numeric zero are all treated as
/// missing, matching how spreadsheet exports leave gaps.
#[must_use]
pub fn is_present(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        serde_json::Value::String(s) => !s.trim().is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// Types a raw row, or returns `None` if any required field is missing.
#[must_use]
pub fn record_from_row(mut row: RawRow) -> Option<SightingRecord> {
    let present = |row: &RawRow, key: &str| row.get(key).is_some_and(is_present);
    if !(present(&row, ID_FIELD) && present(&row, DATE_FIELD) && present(&row, LOCATION_FIELD)) {
        return None;
    }

    let id = to_record_id(row.remove(ID_FIELD)?);
    let date = to_sighting_date(row.remove(DATE_FIELD)?);
    let location = to_text(row.remove(LOCATION_FIELD)?);

    Some(SightingRecord {
        id,
        date,
        location,
        extra: row.into_iter().collect(),
    })
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn to_record_id(value: serde_json::Value) -> RecordId {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return RecordId::Int(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => RecordId::Int(f as i64),
                _ => RecordId::Text(n.to_string()),
            }
        }
        serde_json::Value::String(s) => RecordId::Text(s.trim().to_owned()),
        other => RecordId::Text(other.to_string()),
    }
}

fn to_sighting_date(value: serde_json::Value) -> SightingDate {
    match value {
        serde_json::Value::String(s) => match SightingDate::from_text(&s) {
            SightingDate::Unparsed(raw) => {
                serial_from_text(&raw).unwrap_or(SightingDate::Unparsed(raw))
            }
            parsed => parsed,
        },
        serde_json::Value::Number(n) => n.as_f64().map_or_else(
            || SightingDate::Unparsed(n.to_string()),
            SightingDate::from_excel_serial,
        ),
        other => SightingDate::Unparsed(other.to_string()),
    }
}

/// Delimited sources carry spreadsheet dates as plain numeric text
/// (`44928`, `44928.5`).
fn serial_from_text(raw: &str) -> Option<SightingDate> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    raw.parse::<f64>()
        .ok()
        .and_then(from_excel_serial)
        .map(SightingDate::Parsed)
}

fn to_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Keeps the first record for each id, in source order.
///
/// Returns the surviving records and the ids of every dropped duplicate (one
/// entry per dropped row).
#[must_use]
pub fn dedupe(records: Vec<SightingRecord>) -> (Vec<SightingRecord>, Vec<RecordId>) {
    let mut seen = HashSet::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());
    let mut duplicates = Vec::new();

    for record in records {
        if seen.insert(record.id.clone()) {
            kept.push(record);
        } else {
            log::debug!("Removed duplicate row with id: {}", record.id);
            duplicates.push(record.id);
        }
    }

    (kept, duplicates)
}
