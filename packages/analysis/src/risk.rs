//! Composite risk scoring.

use disaster_map_analysis_models::StatisticsSnapshot;

/// Turns a statistics snapshot into a 0-10 composite risk score.
///
/// Four factors, each clamped before summation:
///
/// 1. event volume — `total / 10`, max 3 points
/// 2. type diversity — `distinct types / 3`, max 2 points
/// 3. high-severity share — `0.3·count(sev 5) + 0.2·count(sev 4)`, max 3 points
/// 4. recent activity — events in the current and previous two years
///    divided by 5, max 2 points
///
/// Pure function of the snapshot and the given calendar year, so test
/// outputs are reproducible. An empty snapshot scores 0.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn risk_score(stats: &StatisticsSnapshot, current_year: i32) -> u8 {
    let volume = (stats.total as f64 / 10.0).min(3.0);

    let diversity = (stats.by_type.len() as f64 / 3.0).min(2.0);

    let extreme = stats.by_severity.get(&5).copied().unwrap_or(0) as f64;
    let severe = stats.by_severity.get(&4).copied().unwrap_or(0) as f64;
    let severity = extreme.mul_add(0.3, severe * 0.2).min(3.0);

    let recent_count: u64 = (current_year - 2..=current_year)
        .map(|year| stats.by_year.get(&year).copied().unwrap_or(0))
        .sum();
    let recency = (recent_count as f64 / 5.0).min(2.0);

    let score = (volume + diversity + severity + recency).round();
    score.clamp(0.0, 10.0) as u8
}
