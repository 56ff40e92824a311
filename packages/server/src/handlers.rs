//! HTTP handler functions for the tick sightings API.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use tick_sightings_analytics::summary::{summarize, summarize_filtered};
use tick_sightings_analytics::{
    AnalyticsError, aggregate, filter::filter_sightings, pagination, validation,
};
use tick_sightings_analytics_models::{
    FilterCriteria, PaginationResult, SummaryInsights, TrendReport,
};
use tick_sightings_sighting_models::SightingRecord;
use tick_sightings_server_models::{
    ApiError, ApiHealth, ApiStatus, ReportQueryParams, SightingsQueryParams, TrendQueryParams,
};

use crate::AppState;

/// A request rejected because of bad query parameters.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct RequestError(#[from] AnalyticsError);

impl ResponseError for RequestError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiError {
            error: self.to_string(),
        })
    }
}

fn criteria(
    location: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<FilterCriteria, RequestError> {
    validation::build_criteria(location, start_date, end_date).map_err(|e| {
        log::debug!("Rejected filter parameters: {e:?}");
        RequestError(e)
    })
}

fn report_criteria(params: &ReportQueryParams) -> Result<FilterCriteria, RequestError> {
    criteria(
        params.location.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )
}

/// `GET /status`
#[utoipa::path(
    get,
    path = "/status",
    tag = "General",
    responses((status = 200, description = "API is running", body = ApiStatus))
)]
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(ApiStatus {
        status: "Running".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    tag = "General",
    responses((status = 200, description = "Service health and dataset size", body = ApiHealth))
)]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.dataset.len(),
    })
}

/// `GET /sightings`
///
/// Filters sightings by location and date range and returns one page.
#[utoipa::path(
    get,
    path = "/sightings",
    tag = "Sightings",
    params(SightingsQueryParams),
    responses(
        (status = 200, description = "One page of matching sightings", body = PaginationResult<SightingRecord>),
        (status = 400, description = "Invalid date, page or limit", body = ApiError),
    )
)]
pub async fn sightings(
    state: web::Data<AppState>,
    params: web::Query<SightingsQueryParams>,
) -> Result<HttpResponse, RequestError> {
    let criteria = criteria(
        params.location.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;

    let filtered = filter_sightings(state.dataset.records(), &criteria);

    let page = pagination::paginate_params(
        &filtered,
        params.page.as_deref(),
        params.limit.as_deref(),
    )
    .inspect_err(|e| log::debug!("Rejected pagination parameters: {e:?}"))?;

    Ok(HttpResponse::Ok().json(page))
}

/// `GET /reports/locations`
///
/// Counts filtered sightings per location.
#[utoipa::path(
    get,
    path = "/reports/locations",
    tag = "Reports",
    params(ReportQueryParams),
    responses(
        (status = 200, description = "Sighting count per location", body = std::collections::HashMap<String, u64>),
        (status = 400, description = "Invalid date", body = ApiError),
    )
)]
pub async fn location_report(
    state: web::Data<AppState>,
    params: web::Query<ReportQueryParams>,
) -> Result<HttpResponse, RequestError> {
    let criteria = report_criteria(&params)?;
    let filtered = filter_sightings(state.dataset.records(), &criteria);

    Ok(HttpResponse::Ok().json(aggregate::aggregate_by_location(filtered)))
}

/// `GET /reports/trends`
///
/// Counts filtered sightings per week (default) or month.
#[utoipa::path(
    get,
    path = "/reports/trends",
    tag = "Reports",
    params(TrendQueryParams),
    responses(
        (status = 200, description = "Sighting counts per time bucket", body = TrendReport),
        (status = 400, description = "Invalid date", body = ApiError),
    )
)]
pub async fn trend_report(
    state: web::Data<AppState>,
    params: web::Query<TrendQueryParams>,
) -> Result<HttpResponse, RequestError> {
    let criteria = criteria(
        params.location.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;
    let filtered = filter_sightings(state.dataset.records(), &criteria);

    Ok(HttpResponse::Ok().json(aggregate::trend_report(
        filtered,
        params.period.as_deref(),
    )))
}

/// `GET /insights/summary`
///
/// Summary statistics over the full dataset. Query parameters are ignored.
#[utoipa::path(
    get,
    path = "/insights/summary",
    tag = "Reports",
    responses((status = 200, description = "Summary over every sighting", body = SummaryInsights))
)]
pub async fn summary(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(summarize(state.dataset.records()))
}

/// `GET /insights/summary/filtered`
///
/// Summary statistics over the sightings matching the filter parameters.
#[utoipa::path(
    get,
    path = "/insights/summary/filtered",
    tag = "Reports",
    params(ReportQueryParams),
    responses(
        (status = 200, description = "Summary over matching sightings", body = SummaryInsights),
        (status = 400, description = "Invalid date", body = ApiError),
    )
)]
pub async fn filtered_summary(
    state: web::Data<AppState>,
    params: web::Query<ReportQueryParams>,
) -> Result<HttpResponse, RequestError> {
    let criteria = report_criteria(&params)?;

    Ok(HttpResponse::Ok().json(summarize_filtered(
        state.dataset.records(),
        &criteria,
    )))
}
