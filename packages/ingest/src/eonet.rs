//! NASA EONET events client.
//!
//! Free, no API key. See <https://eonet.gsfc.nasa.gov/docs/v2.1>

use chrono::{DateTime, Utc};
use disaster_map_disaster_models::{Coordinates, DisasterRecord, DisasterSeverity};
use serde_json::Value;

use crate::{IngestError, location, mapping};

/// Public EONET events endpoint.
pub const EVENTS_URL: &str = "https://eonet.gsfc.nasa.gov/api/v2.1/events";

/// Severity assigned to feed records; the feeds carry no severity of
/// their own.
const DEFAULT_SEVERITY: DisasterSeverity = DisasterSeverity::High;

/// Fetches events from the last `days` days, open and closed.
///
/// # Errors
///
/// Returns [`IngestError`] if the HTTP request or response parsing
/// fails.
pub async fn fetch_events(
    client: &reqwest::Client,
    base_url: &str,
    days: u32,
) -> Result<Vec<DisasterRecord>, IngestError> {
    let resp = client
        .get(base_url)
        .query(&[("days", days.to_string().as_str()), ("status", "all")])
        .send()
        .await?;

    let body: Value = resp.json().await?;
    Ok(parse_events(&body))
}

/// Parses the EONET events payload, skipping events without usable
/// geometry.
fn parse_events(body: &Value) -> Vec<DisasterRecord> {
    let Some(events) = body["events"].as_array() else {
        log::warn!("EONET response has no events array");
        return Vec::new();
    };

    events.iter().filter_map(parse_event).collect()
}

fn parse_event(event: &Value) -> Option<DisasterRecord> {
    let id = event["id"].as_str()?;
    let title = event["title"].as_str()?;
    let geometry = event["geometry"].as_array()?.first()?;

    let coords = geometry["coordinates"].as_array()?;
    let longitude = coords.first()?.as_f64()?;
    let latitude = coords.get(1)?.as_f64()?;
    let coordinates = Coordinates::new(longitude, latitude).ok()?;

    let date_occurred: DateTime<Utc> = geometry["date"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))?;

    let category_id = event["categories"]
        .as_array()
        .and_then(|cats| cats.first())
        .and_then(|cat| cat["id"].as_str())
        .unwrap_or_default();

    let extracted = location::extract_location(title);

    Some(DisasterRecord {
        event_id: format!("nasa_{id}"),
        disaster_type: mapping::map_eonet_category(category_id),
        title: title.to_string(),
        description: event["description"].as_str().map(String::from),
        coordinates,
        city: extracted.city,
        region: None,
        country: extracted.country,
        severity: DEFAULT_SEVERITY,
        date_occurred,
        is_active: event["closed"].is_null(),
        casualties: None,
        damage: None,
    })
}

#[cfg(test)]
mod tests {
    use disaster_map_disaster_models::DisasterType;

    use super::*;

    fn sample_event() -> Value {
        serde_json::json!({
            "id": "EONET_6197",
            "title": "Wildfire in Butte County, USA",
            "description": "Fast-moving fire north of Sacramento.",
            "categories": [{"id": "16", "title": "Wildfires"}],
            "sources": [{"id": "InciWeb", "url": "https://example.test"}],
            "geometry": [{
                "date": "2024-08-12T18:00:00Z",
                "type": "Point",
                "coordinates": [-121.60, 39.75]
            }],
            "closed": null
        })
    }

    #[test]
    fn parses_wildfire_event() {
        let body = serde_json::json!({"events": [sample_event()]});
        let records = parse_events(&body);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.event_id, "nasa_EONET_6197");
        assert_eq!(record.disaster_type, DisasterType::Wildfire);
        assert!((record.coordinates.longitude - -121.60).abs() < f64::EPSILON);
        assert!(record.is_active);
        assert_eq!(record.city.as_deref(), Some("Butte County"));
        assert_eq!(record.country.as_deref(), Some("USA"));
    }

    #[test]
    fn closed_event_is_inactive() {
        let mut event = sample_event();
        event["closed"] = serde_json::json!("2024-09-01T00:00:00Z");
        let body = serde_json::json!({"events": [event]});
        let records = parse_events(&body);
        assert!(!records[0].is_active);
    }

    #[test]
    fn event_without_geometry_is_skipped() {
        let mut event = sample_event();
        event["geometry"] = serde_json::json!([]);
        let body = serde_json::json!({"events": [event]});
        assert!(parse_events(&body).is_empty());
    }

    #[test]
    fn malformed_body_is_empty() {
        assert!(parse_events(&serde_json::json!({"error": "down"})).is_empty());
    }
}
