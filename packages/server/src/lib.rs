#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the tick sightings dataset.
//!
//! Loads the sightings source once at startup into an immutable
//! [`Dataset`], then serves filtered listings, location and trend reports,
//! and summary insights from it, plus an OpenAPI description of the routes
//! under `/docs`. Handlers only read the shared dataset, so no locking is
//! involved.

pub mod config;
mod docs;
mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use tick_sightings_sighting_models::Dataset;

pub use config::ServerConfig;
pub use docs::ApiDoc;

/// Shared application state.
pub struct AppState {
    /// The canonical dataset, read-only for the life of the process.
    pub dataset: Dataset,
}

/// Registers every API route.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(handlers::status))
        .route("/health", web::get().to(handlers::health))
        .route("/sightings", web::get().to(handlers::sightings))
        .route("/reports/locations", web::get().to(handlers::location_report))
        .route("/reports/trends", web::get().to(handlers::trend_report))
        .route("/insights/summary", web::get().to(handlers::summary))
        .route(
            "/insights/summary/filtered",
            web::get().to(handlers::filtered_summary),
        )
        .route("/docs", web::get().to(docs::openapi))
        .route("/docs/openapi.json", web::get().to(docs::openapi));
}

/// Starts the tick sightings API server.
///
/// Loads the dataset from [`ServerConfig::data_path`] and serves it until
/// the server is shut down. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the dataset cannot be loaded, the
/// server fails to bind, or it encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let (dataset, report) =
        tick_sightings_ingest::load_dataset(&config.data_path).map_err(|e| {
            log::error!(
                "Failed to load sightings from {}: {e}",
                config.data_path.display()
            );
            std::io::Error::other(e)
        })?;

    log::info!(
        "Loaded {} of {} rows ({} missing fields, {} duplicates)",
        report.retained,
        report.total_rows,
        report.missing_fields,
        report.duplicates.len()
    );

    let state = web::Data::new(AppState { dataset });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
