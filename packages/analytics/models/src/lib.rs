#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter, report and pagination types for the analytics engine.
//!
//! These are the per-request values that flow in and out of
//! `tick_sightings_analytics`. All report types serialize to the JSON
//! shapes returned by the API.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::ser::SerializeMap as _;
use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Per-request filter predicates. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Location to match exactly, ignoring case.
    pub location: Option<String>,
    /// Inclusive lower bound on the sighting date.
    pub start_date: Option<NaiveDateTime>,
    /// Inclusive upper bound on the sighting date.
    pub end_date: Option<NaiveDateTime>,
}

impl FilterCriteria {
    /// Returns `true` if no predicate is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.location.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Time bucket size for trend reports.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TrendPeriod {
    /// ISO weeks, keyed by their Monday.
    #[default]
    Weekly,
    /// Calendar months, keyed by their first day.
    Monthly,
}

impl TrendPeriod {
    /// Resolves a `period` query value.
    ///
    /// Anything other than a recognised period (including no value at all)
    /// falls back to [`TrendPeriod::Weekly`] instead of being rejected.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }

    /// The `period` label echoed back in a trend report.
    ///
    /// This is the requested value lowercased, even when it is not a
    /// recognised period. Only a missing value reports the default.
    #[must_use]
    pub fn label(value: Option<&str>) -> String {
        value.map_or_else(|| Self::default().to_string(), str::to_lowercase)
    }
}

/// Sighting count for one time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    /// Bucket key (`YYYY-MM-DD`): the week's Monday or the month's first day.
    pub period: String,
    /// Sightings in the bucket.
    pub count: u64,
}

/// A trend report: buckets ordered by ascending key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    /// Requested period, lowercased. Buckets fall back to weekly when this
    /// is not a recognised [`TrendPeriod`].
    pub period: String,
    /// Buckets sorted by `period`.
    pub data: Vec<TrendBucket>,
}

/// Sighting counts per location, in first-seen order.
///
/// Serializes as a JSON object whose keys appear in the order the locations
/// were first counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationCounts {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl LocationCounts {
    /// Creates an empty set of counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sighting at `location`.
    pub fn increment(&mut self, location: &str) {
        if let Some(&i) = self.index.get(location) {
            self.entries[i].1 += 1;
        } else {
            self.index.insert(location.to_owned(), self.entries.len());
            self.entries.push((location.to_owned(), 1));
        }
    }

    /// Returns the count for `location`, if it was seen.
    #[must_use]
    pub fn get(&self, location: &str) -> Option<u64> {
        self.index.get(location).map(|&i| self.entries[i].1)
    }

    /// Iterates `(location, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(loc, count)| (loc.as_str(), *count))
    }

    /// Number of distinct locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// The location with the highest count. Ties go to the location seen
    /// first.
    #[must_use]
    pub fn most_common(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (loc, count) in self.iter() {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((loc, count));
            }
        }
        best
    }
}

impl Serialize for LocationCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (loc, count) in &self.entries {
            map.serialize_entry(loc, count)?;
        }
        map.end()
    }
}

/// Dataset-wide descriptive statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInsights {
    /// Number of sightings considered.
    pub total_sightings: usize,
    /// Earliest sighting day (`YYYY-MM-DD`).
    pub earliest_sighting: Option<String>,
    /// Latest sighting day (`YYYY-MM-DD`).
    pub latest_sighting: Option<String>,
    /// Location with the most sightings.
    pub most_common_location: Option<String>,
    /// Sightings at [`Self::most_common_location`].
    pub sightings_at_most_common_location: u64,
}

/// Default page number when none is given.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size when none is given.
pub const DEFAULT_LIMIT: u64 = 100;

/// Largest accepted page size.
pub const MAX_LIMIT: u64 = 500;

/// Points at a neighbouring page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageLink {
    /// Page number.
    pub page: u64,
    /// Page size.
    pub limit: u64,
}

/// One page of an ordered result set with navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult<T> {
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub limit: u64,
    /// Items in the whole result set.
    pub total: usize,
    /// Number of pages at this page size.
    pub total_pages: u64,
    /// Items on this page. Empty when the page is past the end.
    pub data: Vec<T>,
    /// Next page, if more items follow this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
    /// Previous page, if this page does not start at the first item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_param_falls_back_to_weekly() {
        assert_eq!(TrendPeriod::from_param(None), TrendPeriod::Weekly);
        assert_eq!(TrendPeriod::from_param(Some("monthly")), TrendPeriod::Monthly);
        assert_eq!(TrendPeriod::from_param(Some("MONTHLY")), TrendPeriod::Monthly);
        assert_eq!(TrendPeriod::from_param(Some("Weekly")), TrendPeriod::Weekly);
        assert_eq!(TrendPeriod::from_param(Some("daily")), TrendPeriod::Weekly);
        assert_eq!(TrendPeriod::from_param(Some("")), TrendPeriod::Weekly);
        assert_eq!(TrendPeriod::Monthly.to_string(), "monthly");
    }

    #[test]
    fn period_label_echoes_requested_value() {
        assert_eq!(TrendPeriod::label(None), "weekly");
        assert_eq!(TrendPeriod::label(Some("MONTHLY")), "monthly");
        assert_eq!(TrendPeriod::label(Some("DAILY")), "daily");
        assert_eq!(TrendPeriod::label(Some("")), "");
    }

    #[test]
    fn location_counts_keep_first_seen_order() {
        let mut counts = LocationCounts::new();
        for loc in ["York", "Leeds", "York", "Hull", "Leeds"] {
            counts.increment(loc);
        }

        let pairs: Vec<_> = counts.iter().collect();
        assert_eq!(pairs, vec![("York", 2), ("Leeds", 2), ("Hull", 1)]);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.get("Hull"), Some(1));
        assert_eq!(counts.get("Bath"), None);
    }

    #[test]
    fn most_common_prefers_first_seen_on_ties() {
        let mut counts = LocationCounts::new();
        for loc in ["York", "Leeds", "Leeds", "York"] {
            counts.increment(loc);
        }
        assert_eq!(counts.most_common(), Some(("York", 2)));
        assert_eq!(LocationCounts::new().most_common(), None);
    }

    #[test]
    fn location_counts_serialize_as_object() {
        let mut counts = LocationCounts::new();
        counts.increment("Leeds");
        counts.increment("York");
        counts.increment("Leeds");

        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"Leeds":2,"York":1}"#);
    }

    #[test]
    fn pagination_omits_absent_links() {
        let result = PaginationResult {
            page: 1,
            limit: 10,
            total: 3,
            total_pages: 1,
            data: vec![1, 2, 3],
            next: None,
            previous: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "page": 1,
                "limit": 10,
                "total": 3,
                "totalPages": 1,
                "data": [1, 2, 3],
            })
        );
    }
}
