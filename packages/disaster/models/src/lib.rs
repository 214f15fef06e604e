#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Disaster type taxonomy and the canonical historical record model.
//!
//! This crate defines the closed disaster-type vocabulary used across
//! the entire disaster-map system. Feed adapters normalize their
//! source-specific event types into this shared taxonomy before records
//! cross into the analysis core, so downstream code never needs
//! defensive unknown-type branches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Severity level for a disaster, from 1 (low) to 5 (extreme).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DisasterSeverity {
    /// Level 1: Minor events with little lasting impact
    Low = 1,
    /// Level 2: Localized damage, limited displacement
    Moderate = 2,
    /// Level 3: Significant regional damage
    High = 3,
    /// Level 4: Widespread destruction, mass displacement
    Severe = 4,
    /// Level 5: Catastrophic events
    Extreme = 5,
}

impl DisasterSeverity {
    /// Returns the numeric value of this severity level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a severity level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidSeverityError> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::High),
            4 => Ok(Self::Severe),
            5 => Ok(Self::Extreme),
            _ => Err(InvalidSeverityError { value }),
        }
    }
}

/// Error returned when attempting to create a [`DisasterSeverity`] from an
/// invalid numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 1-5", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

/// The closed set of disaster types recognized by the system.
///
/// Upstream feeds surface open-ended type strings; ingestion adapters
/// must map them into this enum via their explicit mapping tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DisasterType {
    /// Seismic events
    Earthquake,
    /// River, flash, and coastal flooding
    Flood,
    /// Atlantic/East-Pacific tropical cyclones
    Hurricane,
    /// Tornadoes
    Tornado,
    /// Wildland fires
    Wildfire,
    /// Seismic sea waves
    Tsunami,
    /// Volcanic eruptions
    Volcano,
    /// Prolonged precipitation deficit
    Drought,
    /// Landslides and mudflows
    Landslide,
    /// Severe storms not otherwise classified
    Storm,
    /// Indian-Ocean/South-Pacific tropical cyclones
    Cyclone,
    /// Snow avalanches
    Avalanche,
}

impl DisasterType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Earthquake,
            Self::Flood,
            Self::Hurricane,
            Self::Tornado,
            Self::Wildfire,
            Self::Tsunami,
            Self::Volcano,
            Self::Drought,
            Self::Landslide,
            Self::Storm,
            Self::Cyclone,
            Self::Avalanche,
        ]
    }
}

/// A geographic point in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Longitude, -180 to 180.
    pub longitude: f64,
    /// Latitude, -90 to 90.
    pub latitude: f64,
}

impl Coordinates {
    /// Creates coordinates, validating the WGS84 ranges.
    ///
    /// # Errors
    ///
    /// Returns an error if longitude is outside [-180, 180] or latitude
    /// is outside [-90, 90].
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinatesError> {
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinatesError {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }
}

/// Error returned for out-of-range WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinatesError {
    /// The longitude that was provided.
    pub longitude: f64,
    /// The latitude that was provided.
    pub latitude: f64,
}

impl std::fmt::Display for InvalidCoordinatesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid coordinates ({}, {}): longitude must be in [-180, 180], latitude in [-90, 90]",
            self.longitude, self.latitude
        )
    }
}

impl std::error::Error for InvalidCoordinatesError {}

/// Reported human impact of a disaster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Casualties {
    /// Confirmed deaths.
    pub deaths: u64,
    /// Injured persons.
    pub injured: u64,
    /// Missing persons.
    pub missing: u64,
    /// Total affected population.
    pub affected: u64,
}

/// Monetary damage estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageEstimate {
    /// Estimated damage amount.
    pub estimated: f64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// One historical disaster event.
///
/// Records are created by the ingestion adapters and are immutable once
/// handed to the analysis core — every analysis call operates on a
/// read-only snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterRecord {
    /// Source-scoped unique identifier (e.g. `nasa_EONET_6197`).
    pub event_id: String,
    /// Normalized disaster type.
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    /// Human-readable event title.
    pub title: String,
    /// Longer description, when the source provides one.
    pub description: Option<String>,
    /// Event location.
    pub coordinates: Coordinates,
    /// City name, for display only.
    pub city: Option<String>,
    /// Region/state name, for display only.
    pub region: Option<String>,
    /// Country name, for display only.
    pub country: Option<String>,
    /// Severity level (1-5).
    pub severity: DisasterSeverity,
    /// When the event occurred.
    pub date_occurred: DateTime<Utc>,
    /// Whether the event is still ongoing.
    pub is_active: bool,
    /// Reported human impact, if known.
    pub casualties: Option<Casualties>,
    /// Monetary damage estimate, if known.
    pub damage: Option<DamageEstimate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_from_value_roundtrip() {
        for v in 1..=5u8 {
            let severity = DisasterSeverity::from_value(v).unwrap();
            assert_eq!(severity.value(), v);
        }
        assert!(DisasterSeverity::from_value(0).is_err());
        assert!(DisasterSeverity::from_value(6).is_err());
    }

    #[test]
    fn disaster_type_string_roundtrip() {
        for ty in DisasterType::all() {
            let s = ty.to_string();
            assert_eq!(s, s.to_lowercase());
            let parsed: DisasterType = s.parse().unwrap();
            assert_eq!(parsed, *ty);
        }
    }

    #[test]
    fn disaster_type_serializes_lowercase() {
        let json = serde_json::to_string(&DisasterType::Earthquake).unwrap();
        assert_eq!(json, "\"earthquake\"");
    }

    #[test]
    fn coordinates_range_validation() {
        assert!(Coordinates::new(-122.4, 37.8).is_ok());
        assert!(Coordinates::new(180.0, 90.0).is_ok());
        assert!(Coordinates::new(-180.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, 90.5).is_err());
    }

    #[test]
    fn record_type_field_renames_on_wire() {
        let record = DisasterRecord {
            event_id: "test_1".to_string(),
            disaster_type: DisasterType::Flood,
            title: "Flood in Jakarta, Indonesia".to_string(),
            description: None,
            coordinates: Coordinates::new(106.8, -6.2).unwrap(),
            city: Some("Jakarta".to_string()),
            region: None,
            country: Some("Indonesia".to_string()),
            severity: DisasterSeverity::High,
            date_occurred: chrono::Utc::now(),
            is_active: false,
            casualties: None,
            damage: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "flood");
        assert_eq!(json["eventId"], "test_1");
    }
}
