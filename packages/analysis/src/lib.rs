#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location risk analysis engine.
//!
//! Assesses disaster risk near a geographic point by mining the
//! historical record set: proximity search, statistical aggregation, a
//! 0-10 composite risk score, seasonal pattern detection, per-type
//! trend forecasting, and preparedness recommendations.
//!
//! All computation here is pure and synchronous over an immutable,
//! call-local record snapshot. The only suspending operation is the
//! proximity fetch from the [`DisasterStore`](disaster_map_store::DisasterStore)
//! collaborator, so concurrent analysis calls never share mutable state.

pub mod orchestrator;
pub mod proximity;
pub mod recommendations;
pub mod risk;
pub mod seasonal;
pub mod statistics;
pub mod trends;

pub use orchestrator::{AnalysisOptions, analyze_location};

use thiserror::Error;

/// Errors that can occur during a location analysis call.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The record fetch failed. Surfaced unmodified; the engine never
    /// retries or degrades a failed fetch into an empty result.
    #[error(transparent)]
    Retrieval(#[from] disaster_map_store::RetrievalError),

    /// The record fetch did not complete within the configured deadline.
    #[error("Record fetch timed out after {0:?}")]
    FetchTimeout(std::time::Duration),
}
