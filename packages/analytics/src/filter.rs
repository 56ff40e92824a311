//! Location and date-range filtering.

use tick_sightings_analytics_models::FilterCriteria;
use tick_sightings_sighting_models::SightingRecord;

/// Returns the records matching every active predicate, in input order.
///
/// The result borrows from the input; nothing is copied or mutated. Accepts
/// any iterator of record references, so filters can be chained on a
/// previous result.
pub fn filter_sightings<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a SightingRecord>
where
    I: IntoIterator<Item = &'a SightingRecord>,
{
    let location = criteria.location.as_deref().map(str::to_lowercase);

    records
        .into_iter()
        .filter(|record| matches_folded(record, location.as_deref(), criteria))
        .collect()
}

/// Returns `true` if `record` satisfies every active predicate.
#[must_use]
pub fn matches(record: &SightingRecord, criteria: &FilterCriteria) -> bool {
    let location = criteria.location.as_deref().map(str::to_lowercase);
    matches_folded(record, location.as_deref(), criteria)
}

fn matches_folded(
    record: &SightingRecord,
    folded_location: Option<&str>,
    criteria: &FilterCriteria,
) -> bool {
    if let Some(wanted) = folded_location
        && record.location.to_lowercase() != wanted
    {
        return false;
    }

    if criteria.start_date.is_none() && criteria.end_date.is_none() {
        return true;
    }

    // Unreadable dates never satisfy a date bound.
    let Some(occurred_at) = record.occurred_at() else {
        return false;
    };

    criteria.start_date.is_none_or(|start| occurred_at >= start)
        && criteria.end_date.is_none_or(|end| occurred_at <= end)
}
