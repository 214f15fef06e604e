//! In-memory disaster store with Haversine proximity search.
//!
//! Holds an immutable record set and answers proximity queries by
//! linear scan. Fine for the bundled seed datasets (thousands of
//! records); production traffic belongs on a geospatially indexed
//! backend implementing [`DisasterStore`](crate::DisasterStore).

use std::path::Path;

use async_trait::async_trait;
use disaster_map_disaster_models::{Coordinates, DisasterRecord};
use geo::{Distance, Haversine, Point};

use crate::{DisasterStore, RecordFilters, RetrievalError};

/// An immutable, in-memory collection of disaster records.
pub struct InMemoryStore {
    records: Vec<DisasterRecord>,
}

impl InMemoryStore {
    /// Creates a store over the given records.
    #[must_use]
    pub const fn from_records(records: Vec<DisasterRecord>) -> Self {
        Self { records }
    }

    /// Loads records from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::DataLoad`] if the file cannot be read
    /// or does not parse as a `DisasterRecord` array.
    pub fn load_json(path: &Path) -> Result<Self, RetrievalError> {
        let contents = std::fs::read_to_string(path).map_err(|e| RetrievalError::DataLoad {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let records: Vec<DisasterRecord> =
            serde_json::from_str(&contents).map_err(|e| RetrievalError::DataLoad {
                message: format!("Failed to parse {}: {e}", path.display()),
            })?;
        log::info!("Loaded {} disaster records from {}", records.len(), path.display());
        Ok(Self::from_records(records))
    }

    /// Number of records held by this store.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this store holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn matches_filters(record: &DisasterRecord, filters: &RecordFilters) -> bool {
    if !filters.types.is_empty() && !filters.types.contains(&record.disaster_type) {
        return false;
    }
    if let Some(from) = filters.from
        && record.date_occurred < from
    {
        return false;
    }
    if let Some(to) = filters.to
        && record.date_occurred > to
    {
        return false;
    }
    if let Some(min) = filters.severity_min
        && record.severity < min
    {
        return false;
    }
    if let Some(active) = filters.active
        && record.is_active != active
    {
        return false;
    }
    true
}

#[async_trait]
impl DisasterStore for InMemoryStore {
    async fn query_near(
        &self,
        center: Coordinates,
        radius_meters: f64,
        filters: &RecordFilters,
        limit: usize,
    ) -> Result<Vec<DisasterRecord>, RetrievalError> {
        let center_point = Point::new(center.longitude, center.latitude);

        let mut matched: Vec<DisasterRecord> = self
            .records
            .iter()
            .filter(|record| {
                let point = Point::new(record.coordinates.longitude, record.coordinates.latitude);
                Haversine.distance(center_point, point) <= radius_meters
                    && matches_filters(record, filters)
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.date_occurred.cmp(&a.date_occurred));
        matched.truncate(limit);

        Ok(matched)
    }

    async fn list(
        &self,
        filters: &RecordFilters,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<DisasterRecord>, RetrievalError> {
        let mut matched: Vec<DisasterRecord> = self
            .records
            .iter()
            .filter(|record| matches_filters(record, filters))
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.date_occurred.cmp(&a.date_occurred));

        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }

    async fn by_id(&self, event_id: &str) -> Result<Option<DisasterRecord>, RetrievalError> {
        Ok(self
            .records
            .iter()
            .find(|record| record.event_id == event_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use disaster_map_disaster_models::{DisasterSeverity, DisasterType};

    use super::*;

    fn record(
        event_id: &str,
        disaster_type: DisasterType,
        longitude: f64,
        latitude: f64,
        year: i32,
        severity: DisasterSeverity,
    ) -> DisasterRecord {
        DisasterRecord {
            event_id: event_id.to_string(),
            disaster_type,
            title: format!("{disaster_type} event"),
            description: None,
            coordinates: Coordinates::new(longitude, latitude).unwrap(),
            city: None,
            region: None,
            country: None,
            severity,
            date_occurred: Utc.with_ymd_and_hms(year, 6, 15, 0, 0, 0).unwrap(),
            is_active: false,
            casualties: None,
            damage: None,
        }
    }

    fn bay_area_store() -> InMemoryStore {
        InMemoryStore::from_records(vec![
            // San Francisco
            record("sf_quake", DisasterType::Earthquake, -122.42, 37.77, 2023, DisasterSeverity::Severe),
            // Oakland, ~13 km from SF
            record("oak_fire", DisasterType::Wildfire, -122.27, 37.80, 2024, DisasterSeverity::High),
            // Los Angeles, ~560 km from SF
            record("la_fire", DisasterType::Wildfire, -118.24, 34.05, 2022, DisasterSeverity::Extreme),
        ])
    }

    #[tokio::test]
    async fn radius_excludes_distant_records() {
        let store = bay_area_store();
        let center = Coordinates::new(-122.42, 37.77).unwrap();
        let results = store
            .query_near(center, 50_000.0, &RecordFilters::default(), 100)
            .await
            .unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.event_id.as_str()).collect();
        assert!(ids.contains(&"sf_quake"));
        assert!(ids.contains(&"oak_fire"));
        assert!(!ids.contains(&"la_fire"));
    }

    #[tokio::test]
    async fn results_sorted_date_descending_and_truncated() {
        let store = bay_area_store();
        let center = Coordinates::new(-122.42, 37.77).unwrap();
        let results = store
            .query_near(center, 1_000_000.0, &RecordFilters::default(), 2)
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].event_id, "oak_fire"); // 2024
        assert_eq!(results[1].event_id, "sf_quake"); // 2023
    }

    #[tokio::test]
    async fn type_and_severity_filters_apply() {
        let store = bay_area_store();
        let center = Coordinates::new(-122.42, 37.77).unwrap();

        let filters = RecordFilters {
            types: vec![DisasterType::Wildfire],
            ..RecordFilters::default()
        };
        let results = store
            .query_near(center, 1_000_000.0, &filters, 100)
            .await
            .unwrap();
        assert!(results.iter().all(|r| r.disaster_type == DisasterType::Wildfire));
        assert_eq!(results.len(), 2);

        let filters = RecordFilters {
            severity_min: Some(DisasterSeverity::Severe),
            ..RecordFilters::default()
        };
        let results = store
            .query_near(center, 1_000_000.0, &filters, 100)
            .await
            .unwrap();
        assert!(results.iter().all(|r| r.severity >= DisasterSeverity::Severe));
    }

    #[tokio::test]
    async fn list_paginates_newest_first() {
        let store = bay_area_store();

        let page_one = store
            .list(&RecordFilters::default(), 2, 0)
            .await
            .unwrap();
        assert_eq!(page_one.len(), 2);
        assert_eq!(page_one[0].event_id, "oak_fire"); // 2024
        assert_eq!(page_one[1].event_id, "sf_quake"); // 2023

        let page_two = store
            .list(&RecordFilters::default(), 2, 2)
            .await
            .unwrap();
        assert_eq!(page_two.len(), 1);
        assert_eq!(page_two[0].event_id, "la_fire"); // 2022

        let past_the_end = store
            .list(&RecordFilters::default(), 2, 10)
            .await
            .unwrap();
        assert!(past_the_end.is_empty());
    }

    #[tokio::test]
    async fn active_filter_applies() {
        let mut ongoing = record(
            "ongoing_fire",
            DisasterType::Wildfire,
            -122.3,
            37.9,
            2024,
            DisasterSeverity::High,
        );
        ongoing.is_active = true;
        let store = InMemoryStore::from_records(vec![
            ongoing,
            record("done_quake", DisasterType::Earthquake, -122.4, 37.8, 2023, DisasterSeverity::Severe),
        ]);

        let filters = RecordFilters {
            active: Some(true),
            ..RecordFilters::default()
        };
        let results = store.list(&filters, 100, 0).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].event_id, "ongoing_fire");
    }

    #[tokio::test]
    async fn by_id_finds_single_record() {
        let store = bay_area_store();
        let found = store.by_id("sf_quake").await.unwrap();
        assert_eq!(found.unwrap().event_id, "sf_quake");
        assert!(store.by_id("no_such_event").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn date_range_filter_applies() {
        let store = bay_area_store();
        let center = Coordinates::new(-122.42, 37.77).unwrap();
        let filters = RecordFilters {
            from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ..RecordFilters::default()
        };
        let results = store
            .query_near(center, 1_000_000.0, &filters, 100)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].event_id, "oak_fire");
    }
}
