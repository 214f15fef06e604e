//! Best-effort location extraction from event titles.
//!
//! EONET titles often carry a trailing location, e.g.
//! `"Wildfire in Paradise, USA"` or `"Tropical Storm Ida - Cuba"`.
//! Feed payloads have no structured place fields, so this is the only
//! source of display city/country names for those records.

use std::sync::LazyLock;

use regex::Regex;

/// `"... in City, Country"` / `"..., City, Country"` / `"... - City, Country"`
static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bin\s+([^,]+),\s*([^,]+)$").unwrap(),
        Regex::new(r",\s*([^,]+),\s*([^,]+)$").unwrap(),
        Regex::new(r"-\s*([^,]+),\s*([^,]+)$").unwrap(),
    ]
});

/// Country names frequently appearing alone in feed titles.
const KNOWN_COUNTRIES: &[&str] = &[
    "USA",
    "Japan",
    "China",
    "India",
    "Indonesia",
    "Philippines",
    "Australia",
    "Brazil",
    "Mexico",
    "Chile",
    "Italy",
    "Greece",
    "Turkey",
    "Iran",
    "Pakistan",
];

/// Extracted display location: `(city, country)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedLocation {
    /// City name, if the title carried one.
    pub city: Option<String>,
    /// Country name, if the title carried one.
    pub country: Option<String>,
}

/// Pulls a city/country pair out of an event title, when present.
#[must_use]
pub fn extract_location(text: &str) -> ExtractedLocation {
    for pattern in LOCATION_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            return ExtractedLocation {
                city: captures.get(1).map(|m| m.as_str().trim().to_string()),
                country: captures.get(2).map(|m| m.as_str().trim().to_string()),
            };
        }
    }

    for country in KNOWN_COUNTRIES {
        if text.contains(country) {
            return ExtractedLocation {
                city: None,
                country: Some((*country).to_string()),
            };
        }
    }

    ExtractedLocation::default()
}
