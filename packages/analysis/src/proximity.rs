//! Proximity query over the record store collaborator.
//!
//! Thin layer translating the engine's kilometer-radius contract to the
//! store's native meter-based spherical semantics.

use disaster_map_disaster_models::{Coordinates, DisasterRecord};
use disaster_map_store::{DisasterStore, RecordFilters, RetrievalError};

const METERS_PER_KM: f64 = 1000.0;

/// Fetches records within `radius_km` of `center`, sorted by occurrence
/// date descending and truncated to `limit`.
///
/// A non-positive radius yields an empty result without touching the
/// store.
///
/// # Errors
///
/// Returns [`RetrievalError`] if the underlying fetch fails.
pub async fn fetch_near(
    store: &dyn DisasterStore,
    center: Coordinates,
    radius_km: f64,
    filters: &RecordFilters,
    limit: usize,
) -> Result<Vec<DisasterRecord>, RetrievalError> {
    if radius_km <= 0.0 {
        return Ok(Vec::new());
    }
    store
        .query_near(center, radius_km * METERS_PER_KM, filters, limit)
        .await
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::Mutex;

    use super::*;

    /// Records the radius it was called with; returns nothing.
    struct RadiusSpy {
        seen_meters: Mutex<Vec<f64>>,
    }

    #[async_trait]
    impl DisasterStore for RadiusSpy {
        async fn query_near(
            &self,
            _center: Coordinates,
            radius_meters: f64,
            _filters: &RecordFilters,
            _limit: usize,
        ) -> Result<Vec<DisasterRecord>, RetrievalError> {
            self.seen_meters.lock().unwrap().push(radius_meters);
            Ok(Vec::new())
        }

        async fn list(
            &self,
            _filters: &RecordFilters,
            _limit: usize,
            _offset: usize,
        ) -> Result<Vec<DisasterRecord>, RetrievalError> {
            Ok(Vec::new())
        }

        async fn by_id(&self, _event_id: &str) -> Result<Option<DisasterRecord>, RetrievalError> {
            Ok(None)
        }
    }

    struct FailingStore;

    #[async_trait]
    impl DisasterStore for FailingStore {
        async fn query_near(
            &self,
            _center: Coordinates,
            _radius_meters: f64,
            _filters: &RecordFilters,
            _limit: usize,
        ) -> Result<Vec<DisasterRecord>, RetrievalError> {
            Err(RetrievalError::Backend {
                message: "connection refused".to_string(),
            })
        }

        async fn list(
            &self,
            _filters: &RecordFilters,
            _limit: usize,
            _offset: usize,
        ) -> Result<Vec<DisasterRecord>, RetrievalError> {
            Err(RetrievalError::Backend {
                message: "connection refused".to_string(),
            })
        }

        async fn by_id(&self, _event_id: &str) -> Result<Option<DisasterRecord>, RetrievalError> {
            Err(RetrievalError::Backend {
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn converts_kilometers_to_meters() {
        let spy = RadiusSpy {
            seen_meters: Mutex::new(Vec::new()),
        };
        let center = Coordinates::new(0.0, 0.0).unwrap();
        fetch_near(&spy, center, 50.0, &RecordFilters::default(), 100)
            .await
            .unwrap();
        assert_eq!(*spy.seen_meters.lock().unwrap(), vec![50_000.0]);
    }

    #[tokio::test]
    async fn non_positive_radius_is_empty_without_store_call() {
        let spy = RadiusSpy {
            seen_meters: Mutex::new(Vec::new()),
        };
        let center = Coordinates::new(0.0, 0.0).unwrap();
        let results = fetch_near(&spy, center, 0.0, &RecordFilters::default(), 100)
            .await
            .unwrap();
        assert!(results.is_empty());
        let results = fetch_near(&spy, center, -10.0, &RecordFilters::default(), 100)
            .await
            .unwrap();
        assert!(results.is_empty());
        assert!(spy.seen_meters.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let center = Coordinates::new(0.0, 0.0).unwrap();
        let result = fetch_near(&FailingStore, center, 50.0, &RecordFilters::default(), 100).await;
        assert!(matches!(result, Err(RetrievalError::Backend { .. })));
    }
}
