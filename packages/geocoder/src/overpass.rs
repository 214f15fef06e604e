//! Overpass API client for nearby-city lookups.
//!
//! Queries OpenStreetMap `place=city|town` nodes around a point. See
//! <https://wiki.openstreetmap.org/wiki/Overpass_API>

use geo::{Distance, Haversine, Point};

use crate::{GeocodeError, NearbyCity};

/// Public Overpass interpreter endpoint.
pub const INTERPRETER_URL: &str = "https://overpass-api.de/api/interpreter";

/// Finds cities and towns within `radius_km` of a point, sorted by
/// ascending distance.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing
/// fails.
pub async fn nearby_cities(
    client: &reqwest::Client,
    base_url: &str,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Result<Vec<NearbyCity>, GeocodeError> {
    let radius_meters = radius_km * 1000.0;
    let query = format!(
        "[out:json];(node[\"place\"~\"city|town\"][\"name\"](around:{radius_meters},{latitude},{longitude}););out body;"
    );

    let resp = client
        .post(base_url)
        .form(&[("data", query.as_str())])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body, latitude, longitude)
}

/// Parses the Overpass JSON response into distance-sorted cities.
fn parse_response(
    body: &serde_json::Value,
    center_lat: f64,
    center_lon: f64,
) -> Result<Vec<NearbyCity>, GeocodeError> {
    let elements = body["elements"]
        .as_array()
        .ok_or_else(|| GeocodeError::Parse {
            message: "Overpass response has no elements array".to_string(),
        })?;

    let center = Point::new(center_lon, center_lat);

    let mut cities: Vec<NearbyCity> = Vec::new();
    let mut skipped = 0_usize;
    for element in elements {
        let (Some(name), Some(latitude), Some(longitude)) = (
            element["tags"]["name"].as_str(),
            element["lat"].as_f64(),
            element["lon"].as_f64(),
        ) else {
            skipped += 1;
            continue;
        };
        let distance_km = Haversine.distance(center, Point::new(longitude, latitude)) / 1000.0;
        cities.push(NearbyCity {
            name: name.to_string(),
            latitude,
            longitude,
            population: element["tags"]["population"]
                .as_str()
                .and_then(|p| p.parse().ok()),
            place_type: element["tags"]["place"].as_str().map(String::from),
            distance_km,
        });
    }
    if skipped > 0 {
        log::warn!("Skipped {skipped} Overpass elements missing a name or coordinates");
    }

    cities.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Ok(cities)
}
