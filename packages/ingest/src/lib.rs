#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Disaster feed ingestion.
//!
//! Fetches historical and ongoing disaster events from the free NASA
//! EONET and ReliefWeb APIs and normalizes them into
//! [`DisasterRecord`](disaster_map_disaster_models::DisasterRecord)s.
//! Every feed's open-ended type vocabulary is mapped into the closed
//! [`DisasterType`](disaster_map_disaster_models::DisasterType) enum by
//! the explicit tables in [`mapping`] before records cross into the
//! analysis core.

pub mod eonet;
pub mod location;
pub mod mapping;
pub mod reliefweb;

use thiserror::Error;

/// Errors from feed ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}
