#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the disaster map server.
//!
//! Every endpoint answers with a success envelope
//! `{"success": true, "data": ...}` or an error envelope
//! `{"success": false, "message": ...}`.

use disaster_map_analysis_models::AnalysisResult;
use disaster_map_disaster_models::DisasterRecord;
use disaster_map_geocoder::{GeocodedLocation, NearbyCity};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/location/analyze`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Free-text address; geocoded when present.
    pub address: Option<String>,
    /// Explicit latitude, used when no address is given.
    pub latitude: Option<f64>,
    /// Explicit longitude, used when no address is given.
    pub longitude: Option<f64>,
    /// Search radius in kilometers. Defaults to 50.
    pub radius: Option<f64>,
}

/// Body of `POST /api/location/geocode`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeRequest {
    /// Free-text address.
    pub address: String,
}

/// Query string of `GET /api/location/reverse-geocode` and
/// `GET /api/location/nearby-cities`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatesQuery {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Radius in kilometers, where applicable.
    pub radius: Option<f64>,
}

/// Query string of the `GET /api/disasters` family.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterListQuery {
    /// Restrict to one disaster type (lowercase wire name).
    #[serde(rename = "type")]
    pub disaster_type: Option<String>,
    /// Records per page. Defaults to 100, capped at 1000.
    pub limit: Option<usize>,
    /// 1-based page number. Defaults to 1.
    pub page: Option<usize>,
}

/// Payload of the disaster list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterList {
    /// The records on this page, newest first.
    pub disasters: Vec<DisasterRecord>,
    /// Number of records on this page.
    pub count: usize,
    /// The page that was served.
    pub page: usize,
}

/// Success envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSuccess<T> {
    /// Always `true`.
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T> ApiSuccess<T> {
    /// Wraps a payload in the success envelope.
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiFailure {
    /// Always `false`.
    pub success: bool,
    /// Human-readable failure description.
    pub message: String,
}

impl ApiFailure {
    /// Wraps a message in the error envelope.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Payload of a successful analyze call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAnalysis {
    /// The resolved location, passed through from the geocoder.
    pub location: GeocodedLocation,
    /// Search radius that was used, in kilometers.
    pub search_radius: f64,
    /// Cities and towns near the location (top 20 by distance).
    pub nearby_cities: Vec<NearbyCity>,
    /// The analysis engine's output.
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Payload of the nearby-cities endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyCitiesData {
    /// Matching cities, sorted by ascending distance.
    pub cities: Vec<NearbyCity>,
    /// Number of cities returned.
    pub count: usize,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelopes_have_success_flags() {
        let ok = serde_json::to_value(ApiSuccess::new(7)).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"], 7);

        let err = serde_json::to_value(ApiFailure::new("Address is required")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["message"], "Address is required");
    }

    #[test]
    fn analyze_request_accepts_address_or_coordinates() {
        let by_address: AnalyzeRequest =
            serde_json::from_value(serde_json::json!({"address": "Tokyo"})).unwrap();
        assert_eq!(by_address.address.as_deref(), Some("Tokyo"));
        assert!(by_address.latitude.is_none());

        let by_coords: AnalyzeRequest = serde_json::from_value(
            serde_json::json!({"latitude": 35.68, "longitude": 139.76, "radius": 100}),
        )
        .unwrap();
        assert!(by_coords.address.is_none());
        assert_eq!(by_coords.radius, Some(100.0));
    }

    #[test]
    fn disaster_list_query_reads_type_and_paging() {
        let query: DisasterListQuery =
            serde_json::from_value(serde_json::json!({"type": "flood", "limit": 25, "page": 2}))
                .unwrap();
        assert_eq!(query.disaster_type.as_deref(), Some("flood"));
        assert_eq!(query.limit, Some(25));
        assert_eq!(query.page, Some(2));

        let empty: DisasterListQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.disaster_type.is_none() && empty.limit.is_none() && empty.page.is_none());
    }
}
