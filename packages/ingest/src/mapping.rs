//! Feed-specific disaster type normalization tables.
//!
//! Each upstream feed names event types differently; these explicit
//! tables are the only place source vocabularies are translated into
//! the closed [`DisasterType`] taxonomy. Unrecognized types fall back
//! to [`DisasterType::Storm`], matching the behavior of the feeds'
//! catch-all severe-weather bucket.

use disaster_map_disaster_models::DisasterType;

/// Maps a NASA EONET numeric category ID to the canonical type.
///
/// EONET categories without a counterpart in the taxonomy (dust, sea
/// ice, water color, temperature extremes) fall back to `storm`.
#[must_use]
pub fn map_eonet_category(category_id: &str) -> DisasterType {
    match category_id {
        "6" => DisasterType::Drought,
        "8" => DisasterType::Earthquake,
        "9" => DisasterType::Flood,
        "10" => DisasterType::Landslide,
        "14" => DisasterType::Volcano,
        "16" => DisasterType::Wildfire,
        _ => DisasterType::Storm,
    }
}

/// Maps a ReliefWeb disaster type name to the canonical type via
/// keyword matching, case-insensitive.
#[must_use]
pub fn map_reliefweb_type(type_name: Option<&str>) -> DisasterType {
    let Some(name) = type_name else {
        return DisasterType::Storm;
    };
    let lower = name.to_lowercase();

    if lower.contains("flood") {
        DisasterType::Flood
    } else if lower.contains("earthquake") {
        DisasterType::Earthquake
    } else if contains_any(&lower, &["hurricane", "cyclone", "typhoon"]) {
        DisasterType::Hurricane
    } else if lower.contains("tornado") {
        DisasterType::Tornado
    } else if contains_any(&lower, &["fire", "wildfire"]) {
        DisasterType::Wildfire
    } else if lower.contains("tsunami") {
        DisasterType::Tsunami
    } else if lower.contains("volcano") {
        DisasterType::Volcano
    } else if lower.contains("drought") {
        DisasterType::Drought
    } else if contains_any(&lower, &["landslide", "land slide", "mud slide", "mudslide"]) {
        DisasterType::Landslide
    } else if lower.contains("avalanche") {
        DisasterType::Avalanche
    } else {
        DisasterType::Storm
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
