//! ReliefWeb disasters client.
//!
//! Free, no API key. See <https://apidoc.reliefweb.int/>

use chrono::{DateTime, Utc};
use disaster_map_disaster_models::{Coordinates, DisasterRecord, DisasterSeverity};
use serde_json::Value;

use crate::{IngestError, mapping};

/// Public ReliefWeb disasters endpoint.
pub const DISASTERS_URL: &str = "https://api.reliefweb.int/v1/disasters";

const DEFAULT_SEVERITY: DisasterSeverity = DisasterSeverity::High;

/// Fetches the most recent disasters, newest first.
///
/// # Errors
///
/// Returns [`IngestError`] if the HTTP request or response parsing
/// fails.
pub async fn fetch_disasters(
    client: &reqwest::Client,
    base_url: &str,
    limit: u32,
) -> Result<Vec<DisasterRecord>, IngestError> {
    let body = serde_json::json!({
        "limit": limit,
        "fields": {
            "include": ["name", "type", "date", "country", "primary_country", "status"]
        },
        "sort": ["date:desc"]
    });

    let resp = client.post(base_url).json(&body).send().await?;
    let payload: Value = resp.json().await?;
    Ok(parse_disasters(&payload))
}

/// Parses the ReliefWeb payload. Entries whose primary country has no
/// usable coordinates are dropped — a country-centroid record at (0, 0)
/// would poison every proximity query in the Gulf of Guinea.
fn parse_disasters(payload: &Value) -> Vec<DisasterRecord> {
    let Some(items) = payload["data"].as_array() else {
        log::warn!("ReliefWeb response has no data array");
        return Vec::new();
    };

    items.iter().filter_map(parse_item).collect()
}

fn parse_item(item: &Value) -> Option<DisasterRecord> {
    let id = item["id"].as_str()?;
    let fields = &item["fields"];
    let title = fields["name"].as_str()?;

    let location = &fields["primary_country"]["location"];
    let longitude = location["lon"].as_f64()?;
    let latitude = location["lat"].as_f64()?;
    if longitude.abs() < f64::EPSILON && latitude.abs() < f64::EPSILON {
        return None;
    }
    let coordinates = Coordinates::new(longitude, latitude).ok()?;

    let date_occurred: DateTime<Utc> = fields["date"]["created"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))?;

    let type_name = fields["type"]
        .as_array()
        .and_then(|types| types.first())
        .and_then(|ty| ty["name"].as_str());

    Some(DisasterRecord {
        event_id: format!("reliefweb_{id}"),
        disaster_type: mapping::map_reliefweb_type(type_name),
        title: title.to_string(),
        description: None,
        coordinates,
        city: None,
        region: None,
        country: fields["primary_country"]["name"].as_str().map(String::from),
        severity: DEFAULT_SEVERITY,
        date_occurred,
        is_active: fields["status"].as_str() == Some("ongoing"),
        casualties: None,
        damage: None,
    })
}
