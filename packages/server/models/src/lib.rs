#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the tick sightings server.
//!
//! Query parameters are kept as raw strings so the analytics engine can
//! validate them and report its own client-facing messages, instead of the
//! request being rejected by the extractor with a generic error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the sightings endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct SightingsQueryParams {
    /// Location to match (case-insensitive).
    pub location: Option<String>,
    /// Inclusive start date (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub end_date: Option<String>,
    /// Page number, 1-based.
    pub page: Option<String>,
    /// Page size, 1 to 500.
    pub limit: Option<String>,
}

/// Query parameters shared by the report endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ReportQueryParams {
    /// Location to match (case-insensitive).
    pub location: Option<String>,
    /// Inclusive start date (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub end_date: Option<String>,
}

/// Query parameters for the trends endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct TrendQueryParams {
    /// `weekly` (default) or `monthly`.
    pub period: Option<String>,
    /// Location to match (case-insensitive).
    pub location: Option<String>,
    /// Inclusive start date (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub end_date: Option<String>,
}

/// Status endpoint response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    /// Always `"Running"` while the server is up.
    pub status: String,
    /// Time the response was produced.
    pub timestamp: DateTime<Utc>,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Records in the loaded dataset.
    pub records: usize,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}
