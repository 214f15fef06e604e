//! Per-type trend forecasting via ordinary least squares.

use std::collections::BTreeMap;

use chrono::Datelike;
use disaster_map_analysis_models::{Trend, TrendConfidence, TrendForecast};
use disaster_map_disaster_models::{DisasterRecord, DisasterType};

/// Slope magnitude below which a trend is considered stable.
const STABLE_SLOPE: f64 = 0.5;

/// Forecasts next year's event count from yearly totals.
///
/// When `disaster_type` is given, only records of that type feed the
/// regression. Regression points are (year, count) pairs for years that
/// actually have records — zero-count years are not synthesized. At
/// least 2 distinct years are required; otherwise the insufficient-data
/// forecast is returned.
#[must_use]
pub fn forecast(
    records: &[DisasterRecord],
    disaster_type: Option<DisasterType>,
    current_year: i32,
) -> TrendForecast {
    let mut year_counts: BTreeMap<i32, u64> = BTreeMap::new();
    for record in records {
        if disaster_type.is_none_or(|ty| record.disaster_type == ty) {
            *year_counts.entry(record.date_occurred.year()).or_insert(0) += 1;
        }
    }

    if year_counts.len() < 2 {
        return TrendForecast::insufficient_data();
    }

    let Some(slope_intercept) = fit_line(&year_counts) else {
        return TrendForecast::insufficient_data();
    };
    let (slope, intercept) = slope_intercept;

    let predicted = slope.mul_add(f64::from(current_year + 1), intercept).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let predicted_count = predicted.max(0.0) as u64;

    let trend = if slope > STABLE_SLOPE {
        Trend::Increasing
    } else if slope < -STABLE_SLOPE {
        Trend::Decreasing
    } else {
        Trend::Stable
    };

    let confidence = match year_counts.len() {
        0..=2 => TrendConfidence::Low,
        3..=4 => TrendConfidence::Medium,
        _ => TrendConfidence::High,
    };

    TrendForecast {
        trend,
        predicted_count: Some(predicted_count),
        confidence,
    }
}

/// Ordinary least squares fit of count as a function of year.
///
/// Returns `(slope, intercept)`, or `None` when all points share one
/// year and the denominator collapses.
#[allow(clippy::cast_precision_loss)]
fn fit_line(year_counts: &BTreeMap<i32, u64>) -> Option<(f64, f64)> {
    let n = year_counts.len() as f64;

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (&year, &count) in year_counts {
        let x = f64::from(year);
        let y = count as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n.mul_add(sum_x2, -(sum_x * sum_x));
    if denominator.abs() < f64::EPSILON {
        return None;
    }

    let slope = n.mul_add(sum_xy, -(sum_x * sum_y)) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some((slope, intercept))
}
