#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived result types produced by the location risk analysis engine.
//!
//! Everything here is ephemeral — recomputed per analysis call, never
//! persisted. The types are serialized to JSON for the REST API, so
//! field names follow the camelCase API contract.

use std::collections::BTreeMap;

use disaster_map_disaster_models::{DisasterRecord, DisasterType};
use serde::{Deserialize, Serialize};

/// Frequency counts over one fetched record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    /// Total number of records counted.
    pub total: u64,
    /// Count per disaster type.
    pub by_type: BTreeMap<DisasterType, u64>,
    /// Count per severity value (1-5). Only severities that occur are keyed.
    pub by_severity: BTreeMap<u8, u64>,
    /// Count per calendar year of occurrence.
    pub by_year: BTreeMap<i32, u64>,
    /// The record with the latest occurrence date, if any.
    pub most_recent: Option<DisasterRecord>,
}

/// A disaster type with its occurrence count, used for top-type ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    /// The disaster type.
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    /// Number of occurrences.
    pub count: u64,
}

/// Qualitative risk label for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalRisk {
    /// 0-2 events in this month across all years.
    Low,
    /// 3-5 events.
    Medium,
    /// More than 5 events.
    High,
}

/// Event count for one calendar month, collapsed across years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPattern {
    /// Three-letter month label (`Jan` through `Dec`).
    pub month: String,
    /// Events whose occurrence date falls in this month, any year.
    pub count: u64,
    /// Qualitative label derived from the count.
    pub risk: SeasonalRisk,
}

/// Direction of a per-type yearly count trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Regression slope above 0.5 events/year.
    Increasing,
    /// Regression slope below -0.5 events/year.
    Decreasing,
    /// Slope between -0.5 and 0.5.
    Stable,
    /// Fewer than 2 distinct years of data.
    InsufficientData,
}

/// Confidence in a trend forecast, driven by how many distinct years
/// fed the regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendConfidence {
    /// 2 distinct years.
    Low,
    /// 3-4 distinct years.
    Medium,
    /// 5 or more distinct years.
    High,
    /// No forecast was possible.
    #[serde(rename = "n/a")]
    NotApplicable,
}

/// Linear-regression forecast of next year's event count for one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendForecast {
    /// Trend direction.
    pub trend: Trend,
    /// Predicted count for next year. Absent when data is insufficient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_count: Option<u64>,
    /// Forecast confidence.
    pub confidence: TrendConfidence,
}

impl TrendForecast {
    /// The forecast returned when fewer than 2 distinct years are
    /// represented in the input.
    #[must_use]
    pub const fn insufficient_data() -> Self {
        Self {
            trend: Trend::InsufficientData,
            predicted_count: None,
            confidence: TrendConfidence::NotApplicable,
        }
    }
}

/// Preparedness guidance for one frequently occurring disaster type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// The disaster type this guidance addresses.
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    /// Frequency score 1-10 derived from average annual occurrence rate.
    pub frequency_score: u8,
    /// Occurrence count behind the score.
    pub count: u64,
    /// Ordered preparedness actions.
    pub actions: Vec<String>,
}

/// The assembled output of one location analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Frequency counts over the aggregation record set.
    pub statistics: StatisticsSnapshot,
    /// Composite 0-10 risk score.
    pub risk_score: u8,
    /// Top disaster types ranked by descending count.
    pub top_disasters: Vec<TypeCount>,
    /// Fixed 12-entry Jan-Dec seasonal pattern.
    pub seasonal_patterns: Vec<MonthlyPattern>,
    /// Next-year forecast per top disaster type.
    pub future_trends: BTreeMap<DisasterType, TrendForecast>,
    /// Preparedness guidance for top types in the knowledge base.
    pub recommendations: Vec<Recommendation>,
    /// Up to 100 raw records for display.
    pub recent_disasters: Vec<DisasterRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_serializes_snake_case() {
        let json = serde_json::to_string(&Trend::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient_data\"");
    }

    #[test]
    fn not_applicable_confidence_serializes_as_na() {
        let json = serde_json::to_string(&TrendConfidence::NotApplicable).unwrap();
        assert_eq!(json, "\"n/a\"");
    }

    #[test]
    fn insufficient_forecast_omits_predicted_count() {
        let json = serde_json::to_value(TrendForecast::insufficient_data()).unwrap();
        assert!(json.get("predictedCount").is_none());
        assert_eq!(json["trend"], "insufficient_data");
        assert_eq!(json["confidence"], "n/a");
    }

    #[test]
    fn type_count_renames_field() {
        let tc = TypeCount {
            disaster_type: DisasterType::Flood,
            count: 3,
        };
        let json = serde_json::to_value(tc).unwrap();
        assert_eq!(json["type"], "flood");
        assert_eq!(json["count"], 3);
    }
}
