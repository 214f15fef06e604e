//! Preparedness recommendation generation.
//!
//! Guidance exists only for the five disaster types in the hard-coded
//! knowledge base below. Top-ranked types outside the knowledge base
//! are omitted rather than given generic fallback advice.

use disaster_map_analysis_models::{Recommendation, TypeCount};
use disaster_map_disaster_models::DisasterType;

/// Historical window, in years, assumed by the frequency-score lookup.
///
/// Independent of how many years the data actually spans.
pub const DEFAULT_WINDOW_YEARS: u32 = 10;

/// Scores average annual occurrence rate on a fixed 1-10 ladder.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn frequency_score(count: u64, window_years: u32) -> u8 {
    let per_year = count as f64 / f64::from(window_years.max(1));

    if per_year >= 5.0 {
        10
    } else if per_year >= 3.0 {
        8
    } else if per_year >= 2.0 {
        6
    } else if per_year >= 1.0 {
        4
    } else if per_year >= 0.5 {
        2
    } else {
        1
    }
}

/// Fixed action lists per disaster type. `None` for types without
/// curated guidance.
const fn actions_for(disaster_type: DisasterType) -> Option<[&'static str; 4]> {
    match disaster_type {
        DisasterType::Earthquake => Some([
            "Secure heavy furniture to walls",
            "Create a family emergency plan",
            "Maintain earthquake insurance",
            "Prepare an emergency kit with supplies for 72 hours",
        ]),
        DisasterType::Flood => Some([
            "Purchase flood insurance",
            "Keep important documents in waterproof containers",
            "Know your evacuation routes",
            "Install sump pumps and check drains regularly",
        ]),
        DisasterType::Hurricane => Some([
            "Install storm shutters",
            "Trim trees and secure outdoor items",
            "Have plywood ready to cover windows",
            "Stock up on non-perishable food and water",
        ]),
        DisasterType::Wildfire => Some([
            "Create defensible space around your home",
            "Keep gutters clear of debris",
            "Have evacuation bags ready",
            "Sign up for local fire alerts",
        ]),
        DisasterType::Tornado => Some([
            "Identify a safe room in your home",
            "Install a weather radio",
            "Conduct tornado drills",
            "Keep emergency supplies in your safe room",
        ]),
        _ => None,
    }
}

/// Produces one recommendation per top-ranked type that exists in the
/// knowledge base, in ranking order.
#[must_use]
pub fn generate(top_disasters: &[TypeCount], window_years: u32) -> Vec<Recommendation> {
    top_disasters
        .iter()
        .filter_map(|entry| {
            actions_for(entry.disaster_type).map(|actions| Recommendation {
                disaster_type: entry.disaster_type,
                frequency_score: frequency_score(entry.count, window_years),
                count: entry.count,
                actions: actions.iter().map(ToString::to_string).collect(),
            })
        })
        .collect()
}
