#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the disaster map application.
//!
//! A thin adapter over the analysis engine and the record store:
//! request validation happens here, before the core runs; the
//! geocoding collaborators resolve addresses to coordinates; the
//! engine does everything else. The `/api/disasters` family browses
//! the record set directly. Records are served from an in-memory store
//! loaded from a JSON seed file at startup.

mod handlers;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use disaster_map_store::{DisasterStore, InMemoryStore};

/// Shared application state.
pub struct AppState {
    /// Disaster record store.
    pub store: Arc<dyn DisasterStore>,
    /// HTTP client for the geocoding collaborators.
    pub http: reqwest::Client,
}

/// Starts the disaster map API server.
///
/// Loads the record store from the JSON file at `DATA_PATH` (default
/// `data/disasters.json`; a missing file starts an empty store) and
/// binds to `BIND_ADDR`:`PORT`. This is a regular async function — the
/// caller provides the runtime via `#[actix_web::main]`.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the seed data file exists but cannot be parsed, or if the
/// HTTP client cannot be constructed.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_path = std::env::var("DATA_PATH").unwrap_or_else(|_| "data/disasters.json".to_string());
    let store = if Path::new(&data_path).exists() {
        log::info!("Loading disaster records from {data_path}...");
        InMemoryStore::load_json(Path::new(&data_path)).expect("Failed to load disaster data file")
    } else {
        log::warn!("No data file at {data_path}; starting with an empty store");
        InMemoryStore::from_records(Vec::new())
    };

    let http = reqwest::Client::builder()
        .user_agent(disaster_map_geocoder::USER_AGENT)
        .build()
        .expect("Failed to build HTTP client");

    let state = web::Data::new(AppState {
        store: Arc::new(store),
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
                    .route("/disasters", web::get().to(handlers::list_disasters))
                    .route(
                        "/disasters/active",
                        web::get().to(handlers::active_disasters),
                    )
                    .route("/disasters/stats", web::get().to(handlers::disaster_stats))
                    .route(
                        "/disasters/type/{type}",
                        web::get().to(handlers::disasters_by_type),
                    )
                    .route("/disasters/{id}", web::get().to(handlers::disaster_by_id))
                    .route("/location/analyze", web::post().to(handlers::analyze))
                    .route(
                        "/location/nearby-cities",
                        web::get().to(handlers::nearby_cities),
                    )
                    .route("/location/geocode", web::post().to(handlers::geocode))
                    .route(
                        "/location/reverse-geocode",
                        web::get().to(handlers::reverse_geocode),
                    ),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
