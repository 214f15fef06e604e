#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Abstract disaster record store and an in-memory reference backend.
//!
//! The analysis core is store-agnostic: it only needs one operation,
//! a proximity query returning records sorted by occurrence date
//! descending. Production deployments back this trait with a database
//! that has native geospatial indexing; the bundled [`InMemoryStore`]
//! serves tests, demos, and small datasets loaded from JSON.

pub mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use disaster_map_disaster_models::{Coordinates, DisasterRecord, DisasterSeverity, DisasterType};
use thiserror::Error;

/// Error surfaced when a record fetch fails.
///
/// The store performs no retries; retry policy belongs to the backend.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The backing store failed to execute the query.
    #[error("Store backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },

    /// A data file could not be read or parsed.
    #[error("Data load error: {message}")]
    DataLoad {
        /// Description of the load failure.
        message: String,
    },
}

/// Optional filters applied to record queries.
#[derive(Debug, Clone, Default)]
pub struct RecordFilters {
    /// Restrict to these disaster types. Empty means all types.
    pub types: Vec<DisasterType>,
    /// Minimum occurrence date, inclusive.
    pub from: Option<DateTime<Utc>>,
    /// Maximum occurrence date, inclusive.
    pub to: Option<DateTime<Utc>>,
    /// Minimum severity level.
    pub severity_min: Option<DisasterSeverity>,
    /// Restrict by ongoing status.
    pub active: Option<bool>,
}

/// Record retrieval interface shared by the analysis core and the
/// browsing API.
#[async_trait]
pub trait DisasterStore: Send + Sync {
    /// Returns records whose great-circle distance from `center` is at
    /// most `radius_meters`, matching `filters`, sorted by occurrence
    /// date descending and truncated to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] if the underlying fetch fails. A
    /// failed fetch is never silently converted into an empty result.
    async fn query_near(
        &self,
        center: Coordinates,
        radius_meters: f64,
        filters: &RecordFilters,
        limit: usize,
    ) -> Result<Vec<DisasterRecord>, RetrievalError>;

    /// Returns records matching `filters` regardless of location,
    /// sorted by occurrence date descending, skipping `offset` records
    /// and returning at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] if the underlying fetch fails.
    async fn list(
        &self,
        filters: &RecordFilters,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<DisasterRecord>, RetrievalError>;

    /// Looks up a single record by its event ID.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] if the underlying fetch fails. An
    /// unknown ID is `Ok(None)`, not an error.
    async fn by_id(&self, event_id: &str) -> Result<Option<DisasterRecord>, RetrievalError>;
}
