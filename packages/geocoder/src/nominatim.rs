//! Nominatim / OpenStreetMap geocoder client.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use crate::{GeocodeError, GeocodedLocation};

/// Public Nominatim search endpoint.
pub const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Public Nominatim reverse endpoint.
pub const REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Geocodes a free-text address.
///
/// # Errors
///
/// Returns [`GeocodeError::NotFound`] when the query matches nothing,
/// or [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn geocode(
    client: &reqwest::Client,
    base_url: &str,
    address: &str,
) -> Result<GeocodedLocation, GeocodeError> {
    let resp = client
        .get(base_url)
        .query(&[
            ("q", address),
            ("format", "jsonv2"),
            ("limit", "1"),
            ("addressdetails", "1"),
        ])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.json().await?;
    parse_search_response(&body)
}

/// Resolves coordinates back to a display address.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing
/// fails, or [`GeocodeError::NotFound`] for points with no address.
pub async fn reverse_geocode(
    client: &reqwest::Client,
    base_url: &str,
    latitude: f64,
    longitude: f64,
) -> Result<GeocodedLocation, GeocodeError> {
    let resp = client
        .get(base_url)
        .query(&[
            ("lat", latitude.to_string().as_str()),
            ("lon", longitude.to_string().as_str()),
            ("format", "jsonv2"),
            ("addressdetails", "1"),
        ])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.json().await?;
    parse_reverse_response(&body, latitude, longitude)
}

/// Parses the Nominatim search response (a JSON array).
fn parse_search_response(body: &serde_json::Value) -> Result<GeocodedLocation, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim search response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Err(GeocodeError::NotFound);
    };

    let latitude = parse_coordinate(first, "lat")?;
    let longitude = parse_coordinate(first, "lon")?;

    Ok(build_location(first, latitude, longitude))
}

/// Parses the Nominatim reverse response (a single JSON object).
fn parse_reverse_response(
    body: &serde_json::Value,
    latitude: f64,
    longitude: f64,
) -> Result<GeocodedLocation, GeocodeError> {
    if body.get("error").is_some() {
        return Err(GeocodeError::NotFound);
    }
    Ok(build_location(body, latitude, longitude))
}

fn parse_coordinate(value: &serde_json::Value, key: &str) -> Result<f64, GeocodeError> {
    value[key]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: format!("Missing {key} in Nominatim response"),
        })
}

fn build_location(value: &serde_json::Value, latitude: f64, longitude: f64) -> GeocodedLocation {
    let address = &value["address"];
    let string_field = |key: &str| address[key].as_str().map(String::from);

    // Nominatim reports exactly one of city/town/village per place.
    let city = string_field("city")
        .or_else(|| string_field("town"))
        .or_else(|| string_field("village"))
        .or_else(|| string_field("county"));

    GeocodedLocation {
        latitude,
        longitude,
        city,
        state: string_field("state"),
        country: string_field("country"),
        country_code: address["country_code"].as_str().map(str::to_uppercase),
        formatted_address: value["display_name"].as_str().map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_result() {
        let body = serde_json::json!([{
            "lat": "35.6768601",
            "lon": "139.7638947",
            "display_name": "Tokyo, Japan",
            "address": {
                "city": "Tokyo",
                "country": "Japan",
                "country_code": "jp"
            }
        }]);
        let location = parse_search_response(&body).unwrap();
        assert!((location.latitude - 35.6768601).abs() < 1e-6);
        assert_eq!(location.city.as_deref(), Some("Tokyo"));
        assert_eq!(location.country_code.as_deref(), Some("JP"));
        assert_eq!(location.formatted_address.as_deref(), Some("Tokyo, Japan"));
    }

    #[test]
    fn empty_search_is_not_found() {
        let body = serde_json::json!([]);
        assert!(matches!(
            parse_search_response(&body),
            Err(GeocodeError::NotFound)
        ));
    }

    #[test]
    fn town_falls_back_when_city_absent() {
        let body = serde_json::json!([{
            "lat": "44.05",
            "lon": "-121.31",
            "display_name": "Bend, Oregon, USA",
            "address": {
                "town": "Bend",
                "state": "Oregon",
                "country": "United States",
                "country_code": "us"
            }
        }]);
        let location = parse_search_response(&body).unwrap();
        assert_eq!(location.city.as_deref(), Some("Bend"));
        assert_eq!(location.state.as_deref(), Some("Oregon"));
    }

    #[test]
    fn reverse_error_body_is_not_found() {
        let body = serde_json::json!({"error": "Unable to geocode"});
        assert!(matches!(
            parse_reverse_response(&body, 0.0, 0.0),
            Err(GeocodeError::NotFound)
        ));
    }

    #[test]
    fn reverse_keeps_queried_coordinates() {
        let body = serde_json::json!({
            "display_name": "San Francisco, California, USA",
            "address": {
                "city": "San Francisco",
                "state": "California",
                "country": "United States",
                "country_code": "us"
            }
        });
        let location = parse_reverse_response(&body, 37.77, -122.42).unwrap();
        assert!((location.latitude - 37.77).abs() < f64::EPSILON);
        assert!((location.longitude - -122.42).abs() < f64::EPSILON);
        assert_eq!(location.city.as_deref(), Some("San Francisco"));
    }
}
