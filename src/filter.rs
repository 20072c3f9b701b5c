//! Region and quality filtering
//!
//! [`TripFilter`] is a pure predicate over trip records: a record survives
//! only if both endpoints fall inside the zone allow-set, the distance is
//! strictly above the minimum, and the fare is strictly above the minimum.
//! No I/O, no store: the same input and allow-set always produce the same
//! output.

use crate::model::TripRecord;
use crate::zones::ZoneSet;

/// Trips at or below this distance are dropped (zero-distance/no-show trips).
pub const MIN_TRIP_DISTANCE: f64 = 0.1;

/// Trips at or below this fare are dropped (flagged/invalid minimal fares).
pub const MIN_FARE_AMOUNT: f64 = 2.5;

#[derive(Debug, Clone)]
pub struct TripFilter {
    zones: ZoneSet,
    min_distance: f64,
    min_fare: f64,
}

impl TripFilter {
    /// Filter with the default distance/fare thresholds.
    pub fn new(zones: ZoneSet) -> Self {
        Self::with_thresholds(zones, MIN_TRIP_DISTANCE, MIN_FARE_AMOUNT)
    }

    pub fn with_thresholds(zones: ZoneSet, min_distance: f64, min_fare: f64) -> Self {
        Self {
            zones,
            min_distance,
            min_fare,
        }
    }

    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    /// Whether a single record survives the filter.
    pub fn matches(&self, record: &TripRecord) -> bool {
        self.zones.contains(record.pickup_zone)
            && self.zones.contains(record.dropoff_zone)
            && record.trip_distance > self.min_distance
            && record.fare_amount > self.min_fare
    }

    /// Keep the subsequence of records that survive the filter.
    pub fn apply(&self, mut records: Vec<TripRecord>) -> Vec<TripRecord> {
        records.retain(|r| self.matches(r));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(pickup_zone: i64, dropoff_zone: i64, distance: f64, fare: f64) -> TripRecord {
        let pickup = NaiveDate::from_ymd_opt(2023, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let dropoff = NaiveDate::from_ymd_opt(2023, 3, 1)
            .unwrap()
            .and_hms_opt(9, 20, 0)
            .unwrap();
        TripRecord::new(pickup, dropoff, pickup_zone, dropoff_zone, distance, fare)
    }

    fn bronx_filter() -> TripFilter {
        TripFilter::new(ZoneSet::bronx())
    }

    #[test]
    fn test_both_endpoints_must_be_in_region() {
        let filter = bronx_filter();
        assert!(filter.matches(&record(3, 18, 2.0, 10.0)));
        // one endpoint outside is enough to drop the trip
        assert!(!filter.matches(&record(3, 999, 2.0, 10.0)));
        assert!(!filter.matches(&record(999, 18, 2.0, 10.0)));
        assert!(!filter.matches(&record(999, 998, 2.0, 10.0)));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let filter = bronx_filter();
        // boundary values themselves are excluded
        assert!(!filter.matches(&record(3, 18, MIN_TRIP_DISTANCE, 10.0)));
        assert!(!filter.matches(&record(3, 18, 2.0, MIN_FARE_AMOUNT)));
        assert!(filter.matches(&record(3, 18, 0.11, 2.51)));
        assert!(!filter.matches(&record(3, 18, 0.0, 10.0)));
        assert!(!filter.matches(&record(3, 18, 2.0, 0.0)));
    }

    #[test]
    fn test_apply_keeps_order() {
        let filter = bronx_filter();
        let kept = filter.apply(vec![
            record(3, 18, 2.0, 10.0),
            record(999, 18, 2.0, 10.0),
            record(18, 20, 5.0, 22.0),
        ]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].pickup_zone, 3);
        assert_eq!(kept[1].pickup_zone, 18);
    }

    #[test]
    fn test_three_record_batch() {
        // (3→18, 2.0, 10.0) kept; (3→999, 1.0, 5.0) fails region;
        // (18→20, 0.05, 3.0) fails distance
        let filter = bronx_filter();
        let kept = filter.apply(vec![
            record(3, 18, 2.0, 10.0),
            record(3, 999, 1.0, 5.0),
            record(18, 20, 0.05, 3.0),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].pickup_zone, 3);
        assert_eq!(kept[0].dropoff_zone, 18);
    }

    #[test]
    fn test_custom_thresholds() {
        let filter = TripFilter::with_thresholds(ZoneSet::bronx(), 1.0, 5.0);
        assert!(!filter.matches(&record(3, 18, 1.0, 10.0)));
        assert!(filter.matches(&record(3, 18, 1.01, 5.01)));
    }
}
