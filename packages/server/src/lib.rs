#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the gridscout site evaluation map.
//!
//! Serves the REST API behind the map frontend: viewport infrastructure
//! queries, county resolution, hazard/price joins, location search, fiber
//! corridor geometry, and location analysis. The county boundary dataset is
//! loaded once at startup and shared read-only; if that load fails the
//! server still starts, county resolution degrades to the reverse-geocoding
//! fallback, and the failure is reported per-request instead of crashing.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use gridscout_database::db;
use gridscout_spatial::{CountyIndex, dataset};
use switchy_database::Database;

/// County index availability, decided once at startup.
pub enum CountyState {
    /// The boundary dataset loaded; the index serves lookups.
    Ready(Arc<CountyIndex>),
    /// The load failed; the message is reported on county endpoints.
    Unavailable(String),
}

/// Shared application state.
pub struct AppState {
    /// Hosted store connection.
    pub db: Arc<dyn Database>,
    /// County boundary index (or its load failure).
    pub counties: CountyState,
    /// Shared HTTP client for geocoding/places/directions calls.
    pub http: reqwest::Client,
}

/// Loads the county boundary dataset from `COUNTIES_PATH` (default
/// `data/counties.geojson`), or fetches it from `COUNTIES_URL` when set.
async fn load_county_index(http: &reqwest::Client) -> CountyState {
    let result = if let Ok(url) = std::env::var("COUNTIES_URL") {
        log::info!("Fetching county boundaries from {url}");
        dataset::fetch(http, &url).await
    } else {
        let path = std::env::var("COUNTIES_PATH")
            .unwrap_or_else(|_| "data/counties.geojson".to_string());
        log::info!("Loading county boundaries from {path}");
        dataset::load_from_path(std::path::Path::new(&path))
    };

    match result {
        Ok(boundaries) => CountyState::Ready(Arc::new(CountyIndex::build(boundaries))),
        Err(e) => {
            log::error!("County boundary dataset failed to load: {e}");
            CountyState::Unavailable(e.to_string())
        }
    }
}

/// Starts the gridscout API server.
///
/// Connects to the hosted store, loads the county boundary index, and
/// starts the Actix-Web HTTP server. This is a regular async function;
/// the caller provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the store connection fails; a server without its store cannot
/// answer anything.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Connecting to store...");
    let db_conn = db::connect_from_env()
        .await
        .expect("Failed to connect to store");

    let http = reqwest::Client::new();

    let counties = load_county_index(&http).await;

    let state = web::Data::new(AppState {
        db: Arc::from(db_conn),
        counties,
        http,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/power-plants", web::get().to(handlers::power_plants))
                    .route("/datacenters", web::get().to(handlers::datacenters))
                    .route(
                        "/transmission-lines",
                        web::get().to(handlers::transmission_lines),
                    )
                    .route("/county", web::get().to(handlers::county))
                    .route("/hazards", web::get().to(handlers::hazards))
                    .route("/prices", web::get().to(handlers::prices))
                    .route("/search", web::get().to(handlers::search))
                    .route("/filter-options", web::get().to(handlers::filter_options))
                    .route("/fiber-routes", web::get().to(handlers::fiber_routes))
                    .route("/analysis", web::get().to(handlers::analysis)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
