//! Query parameter validation.
//!
//! Runs before any filtering so that a malformed request is rejected
//! without touching the dataset.

use chrono::NaiveDateTime;
use tick_sightings_analytics_models::FilterCriteria;
use tick_sightings_sighting_models::parse_date;

use crate::AnalyticsError;

/// Returns `true` if `value` is present but not a readable date.
///
/// Absent and empty values are valid: the parameter is optional.
#[must_use]
pub fn invalid_date_check(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) if v.is_empty() => false,
        Some(v) => parse_date(v).is_none(),
    }
}

/// Parses an optional date parameter.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidDate`] if the value is present but
/// unreadable.
pub fn parse_date_param(value: Option<&str>) -> Result<Option<NaiveDateTime>, AnalyticsError> {
    if invalid_date_check(value) {
        return Err(AnalyticsError::InvalidDate {
            value: value.unwrap_or_default().to_owned(),
        });
    }
    Ok(value.and_then(parse_date))
}

/// Builds filter criteria from raw query values.
///
/// An empty `location` is treated as absent.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidDate`] if either date bound is
/// unreadable.
pub fn build_criteria(
    location: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<FilterCriteria, AnalyticsError> {
    let start_date = parse_date_param(start_date)?;
    let end_date = parse_date_param(end_date)?;

    Ok(FilterCriteria {
        location: location.filter(|l| !l.is_empty()).map(str::to_owned),
        start_date,
        end_date,
    })
}
