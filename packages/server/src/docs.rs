//! OpenAPI document for the API, served as JSON under `/docs`.

use actix_web::HttpResponse;
use utoipa::OpenApi;

use crate::handlers;

/// OpenAPI 3 description of every route.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tick Sightings API",
        version = "1.0.0",
        description = "API for exploring tick sightings data, including filtering and reports."
    ),
    servers((url = "http://localhost:3000")),
    paths(
        handlers::status,
        handlers::health,
        handlers::sightings,
        handlers::location_report,
        handlers::trend_report,
        handlers::summary,
        handlers::filtered_summary,
    ),
    tags(
        (name = "General", description = "General endpoints for API status and info"),
        (name = "Sightings", description = "Endpoints for retrieving tick sightings data"),
        (name = "Reports", description = "Endpoints for generating reports on tick sightings"),
    )
)]
pub struct ApiDoc;

/// `GET /docs`, `GET /docs/openapi.json`
pub async fn openapi() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
