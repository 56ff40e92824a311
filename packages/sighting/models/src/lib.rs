#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical tick sighting record types.
//!
//! Every row that survives ingestion is represented as a [`SightingRecord`]
//! with the three required fields (`id`, `date`, `location`) typed, and any
//! other source columns carried through untouched in
//! [`SightingRecord::extra`].

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Output format for calendar days (`YYYY-MM-DD`).
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Output format for parsed sighting timestamps.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Largest Excel serial day that still maps to a four-digit year
/// (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_466.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Identifier of a sighting, used as the deduplication key.
///
/// Integer and text identifiers are distinct keys: `1` and `"1"` never
/// collide.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier.
    Int(i64),
    /// Free-form text identifier.
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// The date of a sighting.
///
/// A present but unreadable date is kept as [`SightingDate::Unparsed`] so
/// the row survives loading; it then never matches a date filter and is
/// left out of every date-based aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SightingDate {
    /// Successfully parsed timestamp.
    Parsed(NaiveDateTime),
    /// Raw source text that no supported format accepted.
    Unparsed(String),
}

impl SightingDate {
    /// Parses a textual date cell.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        parse_date(raw).map_or_else(|| Self::Unparsed(raw.to_owned()), Self::Parsed)
    }

    /// Converts a spreadsheet serial day number.
    #[must_use]
    pub fn from_excel_serial(serial: f64) -> Self {
        from_excel_serial(serial).map_or_else(|| Self::Unparsed(serial.to_string()), Self::Parsed)
    }

    /// Returns the parsed timestamp, or `None` if the date was unreadable.
    #[must_use]
    pub const fn value(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Parsed(dt) => Some(*dt),
            Self::Unparsed(_) => None,
        }
    }

    /// Returns the calendar day of the parsed timestamp.
    #[must_use]
    pub fn day(&self) -> Option<NaiveDate> {
        self.value().map(|dt| dt.date())
    }
}

impl From<NaiveDate> for SightingDate {
    fn from(value: NaiveDate) -> Self {
        Self::Parsed(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for SightingDate {
    fn from(value: NaiveDateTime) -> Self {
        Self::Parsed(value)
    }
}

impl fmt::Display for SightingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(dt) => write!(f, "{}", dt.format(DATE_TIME_FORMAT)),
            Self::Unparsed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for SightingDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SightingDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_text(&raw))
    }
}

/// One tick sighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SightingRecord {
    /// Unique identifier.
    pub id: RecordId,
    /// When the sighting happened.
    #[schema(value_type = String, example = "2023-01-02T00:00:00")]
    pub date: SightingDate,
    /// Free-text place name. Compared case-insensitively.
    pub location: String,
    /// Any additional source columns, passed through as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SightingRecord {
    /// Creates a record with no pass-through fields.
    #[must_use]
    pub fn new(id: impl Into<RecordId>, date: impl Into<SightingDate>, location: &str) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            location: location.to_owned(),
            extra: BTreeMap::new(),
        }
    }

    /// Returns the parsed sighting timestamp, if the date was readable.
    #[must_use]
    pub const fn occurred_at(&self) -> Option<NaiveDateTime> {
        self.date.value()
    }
}

/// The canonical, read-only sighting dataset.
///
/// Built once at startup and shared between request handlers. Cloning only
/// bumps a reference count; there is no way to mutate the records after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[SightingRecord]>,
}

impl Dataset {
    /// Wraps already-cleaned records. Order is preserved.
    #[must_use]
    pub fn from_records(records: Vec<SightingRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Returns the records in source order.
    #[must_use]
    pub fn records(&self) -> &[SightingRecord] {
        &self.records
    }
}

impl Deref for Dataset {
    type Target = [SightingRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

/// Parses a date string in any of the accepted formats.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]`,
/// `YYYY-MM-DD HH:MM:SS[.fff]`, `YYYY-MM-DDTHH:MM` and RFC 3339 (normalized
/// to UTC). Date-only values resolve to midnight.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(day) = NaiveDate::parse_from_str(s, DAY_FORMAT) {
        return Some(day.and_time(chrono::NaiveTime::MIN));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Converts an Excel serial day (1900 date system) into a timestamp.
///
/// The integer part counts days from 1899-12-30 and the fractional part is
/// the time of day. Returns `None` for non-positive, non-finite or
/// out-of-range serials.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= 0.0 || serial >= MAX_EXCEL_SERIAL {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(chrono::NaiveTime::MIN);
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

/// Formats a timestamp as its calendar day (`YYYY-MM-DD`).
#[must_use]
pub fn format_day(dt: NaiveDateTime) -> String {
    dt.format(DAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_day_as_midnight() {
        let dt = parse_date("2023-05-01").unwrap();
        assert_eq!(dt, ymd(2023, 5, 1).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn parses_datetime_variants() {
        let expected = ymd(2024, 1, 15).and_hms_opt(14, 30, 0).unwrap();
        assert_eq!(parse_date("2024-01-15T14:30:00").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15 14:30:00").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15T14:30").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15T14:30:00.000").unwrap(), expected);
    }

    #[test]
    fn parses_rfc3339_into_utc() {
        let dt = parse_date("2024-01-15T16:30:00+02:00").unwrap();
        assert_eq!(dt, ymd(2024, 1, 15).and_hms_opt(14, 30, 0).unwrap());
    }

    #[test]
    fn rejects_garbage_and_blank() {
        assert!(parse_date("not-a-date").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("   ").is_none());
        assert!(parse_date("2023-13-01").is_none());
    }

    #[test]
    fn converts_excel_serials() {
        let dt = from_excel_serial(44_928.0).unwrap();
        assert_eq!(dt, ymd(2023, 1, 2).and_hms_opt(0, 0, 0).unwrap());

        let dt = from_excel_serial(44_928.5).unwrap();
        assert_eq!(dt, ymd(2023, 1, 2).and_hms_opt(12, 0, 0).unwrap());

        assert!(from_excel_serial(0.0).is_none());
        assert!(from_excel_serial(-3.0).is_none());
        assert!(from_excel_serial(f64::NAN).is_none());
    }

    #[test]
    fn unparsed_date_keeps_raw_text() {
        let date = SightingDate::from_text("last tuesday");
        assert_eq!(date, SightingDate::Unparsed("last tuesday".to_string()));
        assert!(date.value().is_none());
        assert_eq!(serde_json::to_value(&date).unwrap(), "last tuesday");
    }

    #[test]
    fn record_serializes_extra_fields_inline() {
        let mut record = SightingRecord::new(7, ymd(2023, 1, 2), "Leeds");
        record
            .extra
            .insert("species".to_string(), serde_json::json!("Ixodes ricinus"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "date": "2023-01-02T00:00:00",
                "location": "Leeds",
                "species": "Ixodes ricinus",
            })
        );
    }

    #[test]
    fn record_deserializes_text_ids_and_extras() {
        let record: SightingRecord = serde_json::from_value(serde_json::json!({
            "id": "abc-1",
            "date": "2023-01-09",
            "location": "York",
            "latinName": "Ixodes",
        }))
        .unwrap();

        assert_eq!(record.id, RecordId::Text("abc-1".to_string()));
        assert_eq!(record.date.day(), Some(ymd(2023, 1, 9)));
        assert_eq!(record.extra.len(), 1);
    }

    #[test]
    fn dataset_clones_share_records() {
        let dataset = Dataset::from_records(vec![
            SightingRecord::new(1, ymd(2023, 1, 2), "Leeds"),
            SightingRecord::new(2, ymd(2023, 1, 9), "York"),
        ]);
        let shared = dataset.clone();

        assert_eq!(shared.len(), 2);
        assert!(std::ptr::eq(dataset.records(), shared.records()));
        assert_eq!(dataset[1].location, "York");
    }

    #[test]
    fn int_and_text_ids_are_distinct() {
        assert_ne!(RecordId::Int(1), RecordId::Text("1".to_string()));
        assert_eq!(RecordId::Int(1).to_string(), "1");
    }
}
