//! Composes the analysis pipeline into one result per location query.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{Datelike, Utc};
use disaster_map_analysis_models::{AnalysisResult, TrendForecast, TypeCount};
use disaster_map_disaster_models::{Coordinates, DisasterRecord, DisasterType};
use disaster_map_store::{DisasterStore, RecordFilters};

use crate::{AnalysisError, proximity, recommendations, risk, seasonal, statistics, trends};

/// Tuning knobs for one analysis call.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Search radius in kilometers.
    pub radius_km: f64,
    /// Cap on raw records returned for display.
    pub display_limit: usize,
    /// Cap on the record set feeding aggregation.
    pub stats_limit: usize,
    /// How many top-ranked types get trends and recommendations.
    pub top_n: usize,
    /// Assumed historical window for frequency scoring.
    pub window_years: u32,
    /// Deadline applied to each store fetch.
    pub fetch_timeout: Duration,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            radius_km: 50.0,
            display_limit: 100,
            stats_limit: 1000,
            top_n: 5,
            window_years: recommendations::DEFAULT_WINDOW_YEARS,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Runs the full risk analysis pipeline for one location.
///
/// Issues two independent proximity fetches against the same filter —
/// one capped for display, one capped larger for aggregation — and runs
/// them concurrently, each under [`AnalysisOptions::fetch_timeout`].
/// The pure computation stages then run over the aggregation set. An
/// empty record set degrades to zeroed substructures; a failed or
/// timed-out fetch is fatal to the whole call. Dropping the returned
/// future cancels any outstanding fetch.
///
/// # Errors
///
/// Returns [`AnalysisError`] if either fetch fails or exceeds its
/// deadline.
pub async fn analyze_location(
    store: &dyn DisasterStore,
    center: Coordinates,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError> {
    let filters = RecordFilters::default();

    let display_fetch = fetch_with_deadline(store, center, &filters, options.display_limit, options);
    let stats_fetch = fetch_with_deadline(store, center, &filters, options.stats_limit, options);
    let (recent_disasters, stats_records) = futures::try_join!(display_fetch, stats_fetch)?;

    log::debug!(
        "Analyzing {} records within {} km of ({}, {})",
        stats_records.len(),
        options.radius_km,
        center.latitude,
        center.longitude,
    );

    let statistics = statistics::aggregate(&stats_records);
    let current_year = Utc::now().year();
    let risk_score = risk::risk_score(&statistics, current_year);
    let seasonal_patterns = seasonal::seasonal_patterns(&stats_records);

    let top_disasters = rank_top_types(&statistics.by_type, options.top_n);

    let future_trends: BTreeMap<DisasterType, TrendForecast> = top_disasters
        .iter()
        .map(|entry| {
            (
                entry.disaster_type,
                trends::forecast(&stats_records, Some(entry.disaster_type), current_year),
            )
        })
        .collect();

    let recommendations = recommendations::generate(&top_disasters, options.window_years);

    Ok(AnalysisResult {
        statistics,
        risk_score,
        top_disasters,
        seasonal_patterns,
        future_trends,
        recommendations,
        recent_disasters,
    })
}

async fn fetch_with_deadline(
    store: &dyn DisasterStore,
    center: Coordinates,
    filters: &RecordFilters,
    limit: usize,
    options: &AnalysisOptions,
) -> Result<Vec<DisasterRecord>, AnalysisError> {
    tokio::time::timeout(
        options.fetch_timeout,
        proximity::fetch_near(store, center, options.radius_km, filters, limit),
    )
    .await
    .map_err(|_| AnalysisError::FetchTimeout(options.fetch_timeout))?
    .map_err(AnalysisError::from)
}

/// Ranks types by descending count, breaking ties by ascending type
/// name so outputs are reproducible.
fn rank_top_types(by_type: &BTreeMap<DisasterType, u64>, top_n: usize) -> Vec<TypeCount> {
    let mut ranked: Vec<TypeCount> = by_type
        .iter()
        .map(|(&disaster_type, &count)| TypeCount {
            disaster_type,
            count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.disaster_type.as_ref().cmp(b.disaster_type.as_ref()))
    });
    ranked.truncate(top_n);
    ranked
}
