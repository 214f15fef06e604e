//! Route handlers.
//!
//! Validation happens here, before the analysis core runs: a bad
//! request never reaches the engine. All responses use the
//! success/error envelopes from `disaster_map_server_models`.

use actix_web::{HttpResponse, Responder, web};
use disaster_map_analysis::{AnalysisOptions, analyze_location, statistics};
use disaster_map_disaster_models::{Coordinates, DisasterType};
use disaster_map_geocoder::{GeocodeError, GeocodedLocation, NearbyCity, nominatim, overpass};
use disaster_map_server_models::{
    AnalyzeRequest, ApiFailure, ApiHealth, ApiSuccess, CoordinatesQuery, DisasterList,
    DisasterListQuery, GeocodeRequest, LocationAnalysis, NearbyCitiesData,
};
use disaster_map_store::{RecordFilters, RetrievalError};

use crate::AppState;

const DEFAULT_RADIUS_KM: f64 = 50.0;
const NEARBY_CITIES_LIMIT: usize = 20;
const DEFAULT_LIST_LIMIT: usize = 100;
const MAX_LIST_LIMIT: usize = 1000;

/// `GET /api/health`
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ApiSuccess::new(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// `POST /api/location/analyze`
///
/// Resolves the request to coordinates (geocoding the address, or
/// reverse-geocoding explicit coordinates for display metadata), runs
/// the analysis pipeline, and attaches nearby cities. A nearby-cities
/// failure degrades to an empty list rather than failing the call.
#[allow(clippy::future_not_send)]
pub async fn analyze(state: web::Data<AppState>, body: web::Json<AnalyzeRequest>) -> HttpResponse {
    let request = body.into_inner();

    let location = match resolve_location(&state, &request).await {
        Ok(location) => location,
        Err(response) => return response,
    };

    let center = match Coordinates::new(location.longitude, location.latitude) {
        Ok(center) => center,
        Err(e) => return HttpResponse::BadRequest().json(ApiFailure::new(e.to_string())),
    };

    let radius_km = request.radius.unwrap_or(DEFAULT_RADIUS_KM);
    let options = AnalysisOptions {
        radius_km,
        ..AnalysisOptions::default()
    };

    let result = match analyze_location(state.store.as_ref(), center, &options).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("Analysis failed: {e}");
            return HttpResponse::InternalServerError()
                .json(ApiFailure::new("Failed to analyze location"));
        }
    };

    let nearby_cities =
        fetch_nearby_cities(&state.http, location.latitude, location.longitude, radius_km).await;

    HttpResponse::Ok().json(ApiSuccess::new(LocationAnalysis {
        location,
        search_radius: radius_km,
        nearby_cities,
        result,
    }))
}

/// `GET /api/location/nearby-cities`
#[allow(clippy::future_not_send)]
pub async fn nearby_cities(
    state: web::Data<AppState>,
    query: web::Query<CoordinatesQuery>,
) -> HttpResponse {
    if let Err(response) = validate_coordinates(query.latitude, query.longitude) {
        return response;
    }

    let radius_km = query.radius.unwrap_or(DEFAULT_RADIUS_KM);
    let cities =
        fetch_nearby_cities(&state.http, query.latitude, query.longitude, radius_km).await;
    let count = cities.len();

    HttpResponse::Ok().json(ApiSuccess::new(NearbyCitiesData { cities, count }))
}

/// `POST /api/location/geocode`
#[allow(clippy::future_not_send)]
pub async fn geocode(state: web::Data<AppState>, body: web::Json<GeocodeRequest>) -> HttpResponse {
    let address = body.address.trim();
    if address.is_empty() {
        return HttpResponse::BadRequest().json(ApiFailure::new("Address is required"));
    }

    match nominatim::geocode(&state.http, nominatim::SEARCH_URL, address).await {
        Ok(location) => HttpResponse::Ok().json(ApiSuccess::new(location)),
        Err(e) => geocode_failure(&e),
    }
}

/// `GET /api/location/reverse-geocode`
#[allow(clippy::future_not_send)]
pub async fn reverse_geocode(
    state: web::Data<AppState>,
    query: web::Query<CoordinatesQuery>,
) -> HttpResponse {
    if let Err(response) = validate_coordinates(query.latitude, query.longitude) {
        return response;
    }

    match nominatim::reverse_geocode(
        &state.http,
        nominatim::REVERSE_URL,
        query.latitude,
        query.longitude,
    )
    .await
    {
        Ok(location) => HttpResponse::Ok().json(ApiSuccess::new(location)),
        Err(e) => geocode_failure(&e),
    }
}

/// `GET /api/disasters`
#[allow(clippy::future_not_send)]
pub async fn list_disasters(
    state: web::Data<AppState>,
    query: web::Query<DisasterListQuery>,
) -> HttpResponse {
    let mut filters = RecordFilters::default();
    if let Some(raw) = query.disaster_type.as_deref() {
        match parse_disaster_type(raw) {
            Ok(ty) => filters.types = vec![ty],
            Err(response) => return response,
        }
    }
    serve_record_page(&state, &filters, &query).await
}

/// `GET /api/disasters/active`
#[allow(clippy::future_not_send)]
pub async fn active_disasters(
    state: web::Data<AppState>,
    query: web::Query<DisasterListQuery>,
) -> HttpResponse {
    let filters = RecordFilters {
        active: Some(true),
        ..RecordFilters::default()
    };
    serve_record_page(&state, &filters, &query).await
}

/// `GET /api/disasters/type/{type}`
#[allow(clippy::future_not_send)]
pub async fn disasters_by_type(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DisasterListQuery>,
) -> HttpResponse {
    let ty = match parse_disaster_type(&path) {
        Ok(ty) => ty,
        Err(response) => return response,
    };
    let filters = RecordFilters {
        types: vec![ty],
        ..RecordFilters::default()
    };
    serve_record_page(&state, &filters, &query).await
}

/// `GET /api/disasters/stats`
///
/// Aggregate counts over the entire record set, independent of any
/// location.
#[allow(clippy::future_not_send)]
pub async fn disaster_stats(state: web::Data<AppState>) -> HttpResponse {
    match state
        .store
        .list(&RecordFilters::default(), usize::MAX, 0)
        .await
    {
        Ok(records) => HttpResponse::Ok().json(ApiSuccess::new(statistics::aggregate(&records))),
        Err(e) => store_failure(&e),
    }
}

/// `GET /api/disasters/{id}`
#[allow(clippy::future_not_send)]
pub async fn disaster_by_id(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.store.by_id(&path).await {
        Ok(Some(record)) => HttpResponse::Ok().json(ApiSuccess::new(record)),
        Ok(None) => HttpResponse::NotFound().json(ApiFailure::new("Disaster not found")),
        Err(e) => store_failure(&e),
    }
}

/// Serves one page of filtered records from the store.
#[allow(clippy::future_not_send)]
async fn serve_record_page(
    state: &AppState,
    filters: &RecordFilters,
    query: &DisasterListQuery,
) -> HttpResponse {
    let (limit, page, offset) = page_window(query.limit, query.page);
    match state.store.list(filters, limit, offset).await {
        Ok(disasters) => {
            let count = disasters.len();
            HttpResponse::Ok().json(ApiSuccess::new(DisasterList {
                disasters,
                count,
                page,
            }))
        }
        Err(e) => store_failure(&e),
    }
}

/// Clamps paging parameters and converts the 1-based page to an offset.
fn page_window(limit: Option<usize>, page: Option<usize>) -> (usize, usize, usize) {
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
    let page = page.unwrap_or(1).max(1);
    let offset = (page - 1).saturating_mul(limit);
    (limit, page, offset)
}

fn parse_disaster_type(raw: &str) -> Result<DisasterType, HttpResponse> {
    raw.parse().map_err(|_| {
        HttpResponse::BadRequest().json(ApiFailure::new(format!("Unknown disaster type: {raw}")))
    })
}

fn store_failure(error: &RetrievalError) -> HttpResponse {
    log::error!("Record retrieval failed: {error}");
    HttpResponse::InternalServerError().json(ApiFailure::new("Failed to retrieve disaster records"))
}

/// Resolves an analyze request to a full location: geocode the address
/// when present, otherwise reverse-geocode the explicit coordinates.
#[allow(clippy::future_not_send)]
async fn resolve_location(
    state: &AppState,
    request: &AnalyzeRequest,
) -> Result<GeocodedLocation, HttpResponse> {
    if let Some(address) = request.address.as_deref().map(str::trim)
        && !address.is_empty()
    {
        return nominatim::geocode(&state.http, nominatim::SEARCH_URL, address)
            .await
            .map_err(|e| geocode_failure(&e));
    }

    let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude) else {
        return Err(HttpResponse::BadRequest().json(ApiFailure::new(
            "Either an address or both latitude and longitude are required",
        )));
    };
    validate_coordinates(latitude, longitude)?;

    // The reverse lookup only supplies display metadata; a miss still
    // lets the analysis run on the raw coordinates.
    match nominatim::reverse_geocode(&state.http, nominatim::REVERSE_URL, latitude, longitude).await
    {
        Ok(location) => Ok(location),
        Err(e) => {
            log::warn!("Reverse geocode failed, using bare coordinates: {e}");
            Ok(GeocodedLocation {
                latitude,
                longitude,
                city: None,
                state: None,
                country: None,
                country_code: None,
                formatted_address: None,
            })
        }
    }
}

/// Fetches nearby cities, degrading to an empty list on failure.
#[allow(clippy::future_not_send)]
async fn fetch_nearby_cities(
    client: &reqwest::Client,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Vec<NearbyCity> {
    match overpass::nearby_cities(client, overpass::INTERPRETER_URL, latitude, longitude, radius_km)
        .await
    {
        Ok(mut cities) => {
            cities.truncate(NEARBY_CITIES_LIMIT);
            cities
        }
        Err(e) => {
            log::warn!("Nearby cities lookup failed: {e}");
            Vec::new()
        }
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), HttpResponse> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(HttpResponse::BadRequest()
            .json(ApiFailure::new("Latitude must be between -90 and 90")));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(HttpResponse::BadRequest()
            .json(ApiFailure::new("Longitude must be between -180 and 180")));
    }
    Ok(())
}

fn geocode_failure(error: &GeocodeError) -> HttpResponse {
    match error {
        GeocodeError::NotFound => {
            HttpResponse::NotFound().json(ApiFailure::new("Location not found"))
        }
        GeocodeError::RateLimited => HttpResponse::TooManyRequests()
            .json(ApiFailure::new("Geocoding rate limit exceeded")),
        GeocodeError::Http(_) | GeocodeError::Parse { .. } => {
            log::error!("Geocoding failed: {error}");
            HttpResponse::InternalServerError().json(ApiFailure::new("Geocoding service error"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_outside_range_are_rejected() {
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(-91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, 181.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
    }

    #[test]
    fn page_window_defaults_and_caps() {
        assert_eq!(page_window(None, None), (100, 1, 0));
        assert_eq!(page_window(Some(25), Some(3)), (25, 3, 50));
        // Oversized limits clamp; zero values snap to the minimum.
        assert_eq!(page_window(Some(100_000), None), (1000, 1, 0));
        assert_eq!(page_window(Some(0), Some(0)), (1, 1, 0));
    }

    #[test]
    fn unknown_disaster_type_is_rejected() {
        assert!(parse_disaster_type("earthquake").is_ok());
        assert!(parse_disaster_type("meteor").is_err());
    }
}
