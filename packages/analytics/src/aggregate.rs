//! Location and time-bucket aggregation.

use std::collections::BTreeMap;

use chrono::{Datelike as _, Days, NaiveDateTime};
use tick_sightings_analytics_models::{LocationCounts, TrendBucket, TrendPeriod, TrendReport};
use tick_sightings_sighting_models::{DAY_FORMAT, SightingRecord};

/// Key used for records without a location.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Counts sightings per location (exact, case-sensitive names).
pub fn aggregate_by_location<'a, I>(records: I) -> LocationCounts
where
    I: IntoIterator<Item = &'a SightingRecord>,
{
    let mut counts = LocationCounts::new();
    for record in records {
        if record.location.is_empty() {
            counts.increment(UNKNOWN_LOCATION);
        } else {
            counts.increment(&record.location);
        }
    }
    counts
}

/// Returns the bucket key for a timestamp.
///
/// Weekly keys are the Monday of the ISO week (Sunday belongs to the week
/// that started six days earlier). Monthly keys are the first of the month.
#[must_use]
pub fn period_key(occurred_at: NaiveDateTime, period: TrendPeriod) -> Option<String> {
    let date = occurred_at.date();
    let start = match period {
        TrendPeriod::Monthly => date.with_day(1)?,
        TrendPeriod::Weekly => {
            let offset = date.weekday().number_from_monday() - 1;
            date.checked_sub_days(Days::new(u64::from(offset)))?
        }
    };
    Some(start.format(DAY_FORMAT).to_string())
}

/// Counts sightings per time bucket, sorted by ascending key.
///
/// Records with an unreadable date are skipped.
pub fn aggregate_by_period<'a, I>(records: I, period: TrendPeriod) -> Vec<TrendBucket>
where
    I: IntoIterator<Item = &'a SightingRecord>,
{
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    let mut skipped = 0_usize;

    for record in records {
        let Some(key) = record
            .occurred_at()
            .and_then(|dt| period_key(dt, period))
        else {
            skipped += 1;
            continue;
        };
        *buckets.entry(key).or_default() += 1;
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} sightings with unreadable dates for {period} trend");
    }

    buckets
        .into_iter()
        .map(|(period, count)| TrendBucket { period, count })
        .collect()
}

/// Builds a trend report for a raw `period` query value.
///
/// Unrecognised values bucket weekly but are still echoed back, lowercased,
/// in [`TrendReport::period`].
pub fn trend_report<'a, I>(records: I, period: Option<&str>) -> TrendReport
where
    I: IntoIterator<Item = &'a SightingRecord>,
{
    TrendReport {
        period: TrendPeriod::label(period),
        data: aggregate_by_period(records, TrendPeriod::from_param(period)),
    }
}
