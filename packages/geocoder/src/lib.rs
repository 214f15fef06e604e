#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding collaborators for the disaster map.
//!
//! Converts free-text addresses to coordinates and back using the
//! Nominatim / OpenStreetMap API, and finds nearby cities and towns via
//! the Overpass API. The analysis core only consumes the coordinates;
//! the remaining fields pass through untouched for display.
//!
//! Nominatim has strict rate limits (1 request per second for the
//! public instance) — callers own rate limiting and must send a
//! distinctive User-Agent.

pub mod nominatim;
pub mod overpass;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-Agent sent to the OpenStreetMap services, which reject generic
/// client strings.
pub const USER_AGENT: &str = "disaster-map/0.1";

/// A resolved location with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodedLocation {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// City, town, or village name.
    pub city: Option<String>,
    /// State or region name.
    pub state: Option<String>,
    /// Country name.
    pub country: Option<String>,
    /// Two-letter country code, uppercased.
    pub country_code: Option<String>,
    /// Full formatted address string.
    pub formatted_address: Option<String>,
}

/// A populated place near a queried point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyCity {
    /// Place name.
    pub name: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Population, when tagged in OpenStreetMap.
    pub population: Option<u64>,
    /// OSM place class (`city` or `town`).
    pub place_type: Option<String>,
    /// Great-circle distance from the queried point, in kilometers.
    pub distance_km: f64,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The query matched no location.
    #[error("Location not found")]
    NotFound,

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}
