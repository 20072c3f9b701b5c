//! Trip record model
//!
//! [`TripRecord`] is the unit flowing through the pipeline: six projected
//! columns from the TLC source file, with timestamps already normalized to
//! the canonical string shape stored on `Trip` nodes. The serde renames give
//! the staged CSV its source column names, which the load query consumes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Canonical timestamp shape shared by the staged file and the load query.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const COL_PICKUP_DATETIME: &str = "tpep_pickup_datetime";
pub const COL_DROPOFF_DATETIME: &str = "tpep_dropoff_datetime";
pub const COL_PICKUP_ZONE: &str = "PULocationID";
pub const COL_DROPOFF_ZONE: &str = "DOLocationID";
pub const COL_TRIP_DISTANCE: &str = "trip_distance";
pub const COL_FARE_AMOUNT: &str = "fare_amount";

/// Column order of the staged file, matching the fields the load query reads.
pub const CSV_COLUMNS: [&str; 6] = [
    COL_PICKUP_DATETIME,
    COL_DROPOFF_DATETIME,
    COL_PICKUP_ZONE,
    COL_DROPOFF_ZONE,
    COL_TRIP_DISTANCE,
    COL_FARE_AMOUNT,
];

/// One trip, projected and normalized from the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    #[serde(rename = "tpep_pickup_datetime")]
    pub pickup_datetime: String,
    #[serde(rename = "tpep_dropoff_datetime")]
    pub dropoff_datetime: String,
    #[serde(rename = "PULocationID")]
    pub pickup_zone: i64,
    #[serde(rename = "DOLocationID")]
    pub dropoff_zone: i64,
    pub trip_distance: f64,
    pub fare_amount: f64,
}

impl TripRecord {
    pub fn new(
        pickup: NaiveDateTime,
        dropoff: NaiveDateTime,
        pickup_zone: i64,
        dropoff_zone: i64,
        trip_distance: f64,
        fare_amount: f64,
    ) -> Self {
        Self {
            pickup_datetime: format_timestamp(pickup),
            dropoff_datetime: format_timestamp(dropoff),
            pickup_zone,
            dropoff_zone,
            trip_distance,
            fare_amount,
        }
    }
}

/// Normalize a timestamp to the canonical string shape.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
