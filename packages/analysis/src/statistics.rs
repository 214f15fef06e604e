//! Statistics aggregation over a fetched record set.

use chrono::Datelike;
use disaster_map_analysis_models::StatisticsSnapshot;
use disaster_map_disaster_models::DisasterRecord;

/// Reduces a record set to counts by type, severity, and year.
///
/// Order-independent for the counts. `most_recent` is the record with
/// the maximal occurrence date; on ties the first occurrence in input
/// order wins, so the result is deterministic for any input ordering.
/// An empty input yields a zeroed snapshot, not an error.
#[must_use]
pub fn aggregate(records: &[DisasterRecord]) -> StatisticsSnapshot {
    let mut snapshot = StatisticsSnapshot {
        total: records.len() as u64,
        ..StatisticsSnapshot::default()
    };

    for record in records {
        *snapshot.by_type.entry(record.disaster_type).or_insert(0) += 1;
        *snapshot
            .by_severity
            .entry(record.severity.value())
            .or_insert(0) += 1;
        *snapshot.by_year.entry(record.date_occurred.year()).or_insert(0) += 1;

        // Strict comparison keeps the first of equal-dated records.
        let is_newer = snapshot
            .most_recent
            .as_ref()
            .is_none_or(|current| record.date_occurred > current.date_occurred);
        if is_newer {
            snapshot.most_recent = Some(record.clone());
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use disaster_map_disaster_models::{Coordinates, DisasterSeverity, DisasterType};

    use super::*;

    fn record(
        event_id: &str,
        disaster_type: DisasterType,
        year: i32,
        severity: DisasterSeverity,
    ) -> DisasterRecord {
        DisasterRecord {
            event_id: event_id.to_string(),
            disaster_type,
            title: format!("{disaster_type} event"),
            description: None,
            coordinates: Coordinates::new(0.0, 0.0).unwrap(),
            city: None,
            region: None,
            country: None,
            severity,
            date_occurred: Utc.with_ymd_and_hms(year, 3, 1, 0, 0, 0).unwrap(),
            is_active: false,
            casualties: None,
            damage: None,
        }
    }

    fn worked_example() -> Vec<DisasterRecord> {
        vec![
            record("eq1", DisasterType::Earthquake, 2023, DisasterSeverity::High),
            record("eq2", DisasterType::Earthquake, 2024, DisasterSeverity::Severe),
            record("eq3", DisasterType::Earthquake, 2024, DisasterSeverity::Moderate),
            record("fl1", DisasterType::Flood, 2022, DisasterSeverity::High),
            record("fl2", DisasterType::Flood, 2023, DisasterSeverity::Extreme),
        ]
    }

    #[test]
    fn counts_match_worked_example() {
        let snapshot = aggregate(&worked_example());
        assert_eq!(snapshot.total, 5);
        assert_eq!(snapshot.by_type[&DisasterType::Earthquake], 3);
        assert_eq!(snapshot.by_type[&DisasterType::Flood], 2);
        assert_eq!(snapshot.by_year[&2022], 1);
        assert_eq!(snapshot.by_year[&2023], 2);
        assert_eq!(snapshot.by_year[&2024], 2);
    }

    #[test]
    fn count_sums_equal_total() {
        let snapshot = aggregate(&worked_example());
        assert_eq!(snapshot.by_type.values().sum::<u64>(), snapshot.total);
        assert_eq!(snapshot.by_severity.values().sum::<u64>(), snapshot.total);
        assert_eq!(snapshot.by_year.values().sum::<u64>(), snapshot.total);
    }

    #[test]
    fn empty_input_yields_zero_snapshot() {
        let snapshot = aggregate(&[]);
        assert_eq!(snapshot.total, 0);
        assert!(snapshot.by_type.is_empty());
        assert!(snapshot.by_severity.is_empty());
        assert!(snapshot.by_year.is_empty());
        assert!(snapshot.most_recent.is_none());
    }

    #[test]
    fn most_recent_prefers_first_of_tied_dates() {
        let records = vec![
            record("first", DisasterType::Flood, 2024, DisasterSeverity::High),
            record("second", DisasterType::Storm, 2024, DisasterSeverity::High),
            record("older", DisasterType::Flood, 2020, DisasterSeverity::Low),
        ];
        let snapshot = aggregate(&records);
        assert_eq!(snapshot.most_recent.unwrap().event_id, "first");
    }

    #[test]
    fn idempotent_and_non_mutating() {
        let records = worked_example();
        let before = records.clone();
        let first = aggregate(&records);
        let second = aggregate(&records);
        assert_eq!(first, second);
        assert_eq!(records, before);
    }
}
