//! Seasonal pattern detection.

use chrono::Datelike;
use disaster_map_analysis_models::{MonthlyPattern, SeasonalRisk};
use disaster_map_disaster_models::DisasterRecord;

/// Month labels in fixed Jan-Dec order.
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Buckets records into the 12 calendar months, summed across all years.
///
/// Always returns exactly 12 entries in Jan-Dec order; the counts sum
/// to the input length.
#[must_use]
pub fn seasonal_patterns(records: &[DisasterRecord]) -> Vec<MonthlyPattern> {
    let mut counts = [0u64; 12];
    for record in records {
        counts[record.date_occurred.month0() as usize] += 1;
    }

    counts
        .iter()
        .zip(MONTH_LABELS)
        .map(|(&count, month)| MonthlyPattern {
            month: month.to_string(),
            count,
            risk: risk_label(count),
        })
        .collect()
}

const fn risk_label(count: u64) -> SeasonalRisk {
    if count > 5 {
        SeasonalRisk::High
    } else if count > 2 {
        SeasonalRisk::Medium
    } else {
        SeasonalRisk::Low
    }
}
