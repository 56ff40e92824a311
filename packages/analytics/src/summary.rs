//! Dataset-wide descriptive statistics.

use tick_sightings_analytics_models::{FilterCriteria, SummaryInsights};
use tick_sightings_sighting_models::{SightingRecord, format_day};

use crate::aggregate::aggregate_by_location;
use crate::filter::filter_sightings;

/// Summarizes the given records.
///
/// The summary endpoint calls this with the whole dataset; query filters
/// are deliberately not applied there. Dates that could not be parsed are
/// ignored for the earliest/latest values but still count towards totals.
pub fn summarize<'a, I>(records: I) -> SummaryInsights
where
    I: IntoIterator<Item = &'a SightingRecord>,
{
    let records: Vec<&SightingRecord> = records.into_iter().collect();

    let mut earliest = None;
    let mut latest = None;
    for occurred_at in records.iter().filter_map(|r| r.occurred_at()) {
        if earliest.is_none_or(|e| occurred_at < e) {
            earliest = Some(occurred_at);
        }
        if latest.is_none_or(|l| occurred_at > l) {
            latest = Some(occurred_at);
        }
    }

    let counts = aggregate_by_location(records.iter().copied());
    let (most_common_location, sightings_at_most_common_location) = counts
        .most_common()
        .map_or((None, 0), |(loc, count)| (Some(loc.to_owned()), count));

    SummaryInsights {
        total_sightings: records.len(),
        earliest_sighting: earliest.map(format_day),
        latest_sighting: latest.map(format_day),
        most_common_location,
        sightings_at_most_common_location,
    }
}

/// Summarizes only the records matching `criteria`.
pub fn summarize_filtered<'a, I>(records: I, criteria: &FilterCriteria) -> SummaryInsights
where
    I: IntoIterator<Item = &'a SightingRecord>,
{
    summarize(filter_sightings(records, criteria))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tick_sightings_sighting_models::SightingDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<SightingRecord> {
        vec![
            SightingRecord::new(1, day(2023, 4, 2), "York"),
            SightingRecord::new(2, day(2022, 11, 9), "Leeds"),
            SightingRecord::new(3, SightingDate::Unparsed("unknown".to_string()), "Leeds"),
            SightingRecord::new(4, day(2023, 7, 19), "York"),
            SightingRecord::new(5, day(2023, 1, 1), "Hull"),
        ]
    }

    #[test]
    fn summarizes_dates_and_top_location() {
        let data = sample();
        let summary = summarize(&data);

        assert_eq!(
            summary,
            SummaryInsights {
                total_sightings: 5,
                earliest_sighting: Some("2022-11-09".to_string()),
                latest_sighting: Some("2023-07-19".to_string()),
                most_common_location: Some("York".to_string()),
                sightings_at_most_common_location: 2,
            }
        );
    }

    #[test]
    fn empty_dataset_has_null_fields() {
        let summary = summarize(std::iter::empty());

        assert_eq!(summary.total_sightings, 0);
        assert!(summary.earliest_sighting.is_none());
        assert!(summary.latest_sighting.is_none());
        assert!(summary.most_common_location.is_none());
        assert_eq!(summary.sightings_at_most_common_location, 0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["earliestSighting"], serde_json::Value::Null);
        assert_eq!(json["mostCommonLocation"], serde_json::Value::Null);
    }

    #[test]
    fn filtered_summary_only_counts_matches() {
        let data = sample();
        let criteria = FilterCriteria {
            location: Some("leeds".to_string()),
            ..FilterCriteria::default()
        };

        let summary = summarize_filtered(&data, &criteria);

        assert_eq!(summary.total_sightings, 2);
        assert_eq!(summary.earliest_sighting.as_deref(), Some("2022-11-09"));
        assert_eq!(summary.latest_sighting.as_deref(), Some("2022-11-09"));
        assert_eq!(summary.most_common_location.as_deref(), Some("Leeds"));
    }
}
