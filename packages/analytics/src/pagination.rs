//! Page slicing with strict bounds validation.
//!
//! Out-of-range `page`/`limit` values are rejected, never clamped. A page
//! past the end of the data is not an error; it just comes back empty.

use tick_sightings_analytics_models::{
    DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, PageLink, PaginationResult,
};

use crate::AnalyticsError;

/// Parses the `page` query value. Absent or empty means page 1.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidPage`] unless the value is an integer
/// `>= 1`.
pub fn parse_page(value: Option<&str>) -> Result<u64, AnalyticsError> {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_PAGE);
    };

    // Integers beyond `i64` fail to parse and are rejected like any other
    // out-of-range page.
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|page| *page >= 1)
        .and_then(|page| u64::try_from(page).ok())
        .ok_or_else(|| AnalyticsError::InvalidPage {
            value: raw.to_owned(),
        })
}

/// Parses the `limit` query value. Absent or empty means 100.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidLimit`] unless the value is an integer
/// in `1..=500`.
pub fn parse_limit(value: Option<&str>) -> Result<u64, AnalyticsError> {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_LIMIT);
    };

    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|limit| u64::try_from(limit).ok())
        .filter(|limit| (1..=MAX_LIMIT).contains(limit))
        .ok_or_else(|| AnalyticsError::InvalidLimit {
            value: raw.to_owned(),
        })
}

/// Slices `items` into the requested page.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if `page` is zero or `limit` is outside
/// `1..=500`.
pub fn paginate<T: Clone>(
    items: &[T],
    page: u64,
    limit: u64,
) -> Result<PaginationResult<T>, AnalyticsError> {
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(AnalyticsError::InvalidLimit {
            value: limit.to_string(),
        });
    }
    if page < 1 {
        return Err(AnalyticsError::InvalidPage {
            value: page.to_string(),
        });
    }

    let total = items.len();
    let start = to_index((page - 1).saturating_mul(limit));
    let end = to_index(page.saturating_mul(limit));

    let data = items[start.min(total)..end.min(total)].to_vec();

    let next = (end < total).then(|| PageLink {
        page: page.saturating_add(1),
        limit,
    });
    let previous = (start > 0).then(|| PageLink {
        page: page - 1,
        limit,
    });

    Ok(PaginationResult {
        page,
        limit,
        total,
        total_pages: u64::try_from(total).unwrap_or(u64::MAX).div_ceil(limit),
        data,
        next,
        previous,
    })
}

/// Parses raw `page`/`limit` query values and slices `items`.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidLimit`] or
/// [`AnalyticsError::InvalidPage`] for malformed or out-of-range values.
/// `limit` is checked first.
pub fn paginate_params<T: Clone>(
    items: &[T],
    page: Option<&str>,
    limit: Option<&str>,
) -> Result<PaginationResult<T>, AnalyticsError> {
    let limit = parse_limit(limit)?;
    let page = parse_page(page)?;
    paginate(items, page, limit)
}

fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(n: u32) -> Vec<u32> {
        (1..=n).collect()
    }

    #[test]
    fn middle_page_has_both_links() {
        let items = range(250);
        let result = paginate(&items, 2, 100).unwrap();

        assert_eq!(result.page, 2);
        assert_eq!(result.limit, 100);
        assert_eq!(result.total, 250);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.data, (101..=200).collect::<Vec<_>>());
        assert_eq!(result.next, Some(PageLink { page: 3, limit: 100 }));
        assert_eq!(result.previous, Some(PageLink { page: 1, limit: 100 }));
    }

    #[test]
    fn first_and_last_pages() {
        let items = range(250);

        let first = paginate(&items, 1, 100).unwrap();
        assert!(first.previous.is_none());
        assert!(first.next.is_some());

        let last = paginate(&items, 3, 100).unwrap();
        assert_eq!(last.data, (201..=250).collect::<Vec<_>>());
        assert!(last.next.is_none());
        assert_eq!(last.previous, Some(PageLink { page: 2, limit: 100 }));
    }

    #[test]
    fn page_past_end_is_empty_not_error() {
        let items = range(10);
        let result = paginate(&items, 5, 10).unwrap();

        assert!(result.data.is_empty());
        assert_eq!(result.total_pages, 1);
        assert!(result.next.is_none());
        assert_eq!(result.previous, Some(PageLink { page: 4, limit: 10 }));
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let result = paginate::<u32>(&[], 1, 100).unwrap();
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 0);
        assert!(result.next.is_none());
        assert!(result.previous.is_none());
    }

    #[test]
    fn pages_reconstruct_the_input() {
        let items = range(1_234);
        for limit in [1, 7, 100, 500] {
            let total_pages = paginate(&items, 1, limit).unwrap().total_pages;
            let rebuilt: Vec<u32> = (1..=total_pages)
                .flat_map(|page| paginate(&items, page, limit).unwrap().data)
                .collect();
            assert_eq!(rebuilt, items, "limit {limit}");
        }
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let items = range(3);
        let result = paginate(&items, u64::MAX, 500).unwrap();
        assert!(result.data.is_empty());
        assert!(result.next.is_none());
    }

    #[test]
    fn page_numbers_beyond_i64_are_rejected() {
        let raw = "99999999999999999999";
        assert_eq!(
            parse_page(Some(raw)),
            Err(AnalyticsError::InvalidPage {
                value: raw.to_string()
            })
        );
        assert_eq!(
            paginate_params(&range(3), Some(raw), None)
                .unwrap_err()
                .to_string(),
            "Page number must be 1 or greater."
        );
        assert!(matches!(
            parse_limit(Some(raw)),
            Err(AnalyticsError::InvalidLimit { .. })
        ));
    }

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(parse_page(None).unwrap(), 1);
        assert_eq!(parse_page(Some("")).unwrap(), 1);
        assert_eq!(parse_limit(None).unwrap(), 100);
        assert_eq!(parse_limit(Some("")).unwrap(), 100);
    }

    #[test]
    fn accepts_limits_at_the_bounds() {
        assert_eq!(parse_limit(Some("1")).unwrap(), 1);
        assert_eq!(parse_limit(Some("500")).unwrap(), 500);
        assert_eq!(parse_page(Some("42")).unwrap(), 42);
    }

    #[test]
    fn rejects_out_of_range_params() {
        for bad in ["0", "501", "abc", "-5", "2.5"] {
            assert!(
                matches!(parse_limit(Some(bad)), Err(AnalyticsError::InvalidLimit { .. })),
                "limit {bad}"
            );
        }
        for bad in ["0", "-1", "x", "1.5"] {
            assert!(
                matches!(parse_page(Some(bad)), Err(AnalyticsError::InvalidPage { .. })),
                "page {bad}"
            );
        }
    }

    #[test]
    fn paginate_rejects_invalid_numbers() {
        let items = range(3);
        assert!(matches!(
            paginate(&items, 0, 10),
            Err(AnalyticsError::InvalidPage { .. })
        ));
        assert!(matches!(
            paginate(&items, 1, 0),
            Err(AnalyticsError::InvalidLimit { .. })
        ));
        assert!(matches!(
            paginate(&items, 1, 501),
            Err(AnalyticsError::InvalidLimit { .. })
        ));
    }

    #[test]
    fn params_produce_client_messages() {
        let items = range(3);
        let err = paginate_params(&items, Some("1"), Some("abc")).unwrap_err();
        assert_eq!(err.to_string(), "Limit must be a number in the range of 1 to 500");

        let err = paginate_params(&items, Some("0"), None).unwrap_err();
        assert_eq!(err.to_string(), "Page number must be 1 or greater.");

        let ok = paginate_params(&items, None, None).unwrap();
        assert_eq!(ok.data, items);
    }
}
