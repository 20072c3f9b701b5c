//! Parquet source reader
//!
//! Reads a TLC trip batch file and projects the six columns the pipeline
//! consumes. Zone ids arrive as Int32 or Int64 depending on the file
//! vintage, timestamps as microsecond or nanosecond precision; both are
//! coerced here. A missing column, unsupported column type, or null cell
//! aborts the read; there is no per-row skip policy.

use std::fs::File;
use std::path::Path;

use arrow::array::{
    Array, Float64Array, Int32Array, Int64Array, TimestampMicrosecondArray,
    TimestampMillisecondArray, TimestampNanosecondArray,
};
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::model::{
    COL_DROPOFF_DATETIME, COL_DROPOFF_ZONE, COL_FARE_AMOUNT, COL_PICKUP_DATETIME, COL_PICKUP_ZONE,
    COL_TRIP_DISTANCE, TripRecord,
};

/// Error type for source file reads
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to open {path}: {error}")]
    Open { path: String, error: String },

    #[error("Parquet read error: {0}")]
    Parquet(String),

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    #[error("Column {column} has unsupported type {datatype}")]
    ColumnType { column: &'static str, datatype: String },

    #[error("Null value in column {column} at row {row}")]
    NullValue { column: &'static str, row: usize },

    #[error("Out-of-range timestamp in column {column} at row {row}")]
    InvalidTimestamp { column: &'static str, row: usize },
}

/// Result type for source file reads
pub type SourceResult<T> = Result<T, SourceError>;

/// Read all trip records from a Parquet batch file.
pub fn read_trips(path: &Path) -> SourceResult<Vec<TripRecord>> {
    let file = File::open(path).map_err(|e| SourceError::Open {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| SourceError::Parquet(e.to_string()))?;
    let num_rows = builder.metadata().file_metadata().num_rows();
    let reader = builder
        .build()
        .map_err(|e| SourceError::Parquet(e.to_string()))?;

    let mut records = Vec::with_capacity(num_rows.max(0) as usize);
    for batch in reader {
        let batch = batch.map_err(|e| SourceError::Parquet(e.to_string()))?;
        read_batch(&batch, &mut records)?;
    }

    tracing::info!(path = %path.display(), records = records.len(), "Read trip batch");
    Ok(records)
}

fn read_batch(batch: &RecordBatch, records: &mut Vec<TripRecord>) -> SourceResult<()> {
    let pickups = timestamp_column(batch, COL_PICKUP_DATETIME)?;
    let dropoffs = timestamp_column(batch, COL_DROPOFF_DATETIME)?;
    let pickup_zones = zone_column(batch, COL_PICKUP_ZONE)?;
    let dropoff_zones = zone_column(batch, COL_DROPOFF_ZONE)?;
    let distances = float_column(batch, COL_TRIP_DISTANCE)?;
    let fares = float_column(batch, COL_FARE_AMOUNT)?;

    for row in 0..batch.num_rows() {
        records.push(TripRecord::new(
            pickups[row],
            dropoffs[row],
            pickup_zones[row],
            dropoff_zones[row],
            distances[row],
            fares[row],
        ));
    }

    Ok(())
}

fn column<'a>(
    batch: &'a RecordBatch,
    name: &'static str,
) -> SourceResult<&'a dyn Array> {
    batch
        .column_by_name(name)
        .map(|c| c.as_ref())
        .ok_or(SourceError::MissingColumn(name))
}

fn type_error(column: &'static str, array: &dyn Array) -> SourceError {
    SourceError::ColumnType {
        column,
        datatype: array.data_type().to_string(),
    }
}

fn zone_column(batch: &RecordBatch, name: &'static str) -> SourceResult<Vec<i64>> {
    let col = column(batch, name)?;
    let mut zones = Vec::with_capacity(col.len());

    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .ok_or_else(|| type_error(name, col))?;
            for row in 0..arr.len() {
                if arr.is_null(row) {
                    return Err(SourceError::NullValue { column: name, row });
                }
                zones.push(i64::from(arr.value(row)));
            }
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(|| type_error(name, col))?;
            for row in 0..arr.len() {
                if arr.is_null(row) {
                    return Err(SourceError::NullValue { column: name, row });
                }
                zones.push(arr.value(row));
            }
        }
        _ => return Err(type_error(name, col)),
    }

    Ok(zones)
}

fn float_column(batch: &RecordBatch, name: &'static str) -> SourceResult<Vec<f64>> {
    let col = column(batch, name)?;
    let arr = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| type_error(name, col))?,
        _ => return Err(type_error(name, col)),
    };

    let mut values = Vec::with_capacity(arr.len());
    for row in 0..arr.len() {
        if arr.is_null(row) {
            return Err(SourceError::NullValue { column: name, row });
        }
        values.push(arr.value(row));
    }

    Ok(values)
}

fn timestamp_column(batch: &RecordBatch, name: &'static str) -> SourceResult<Vec<NaiveDateTime>> {
    let col = column(batch, name)?;
    let mut values = Vec::with_capacity(col.len());

    match col.data_type() {
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            let arr = col
                .as_any()
                .downcast_ref::<TimestampMicrosecondArray>()
                .ok_or_else(|| type_error(name, col))?;
            for row in 0..arr.len() {
                if arr.is_null(row) {
                    return Err(SourceError::NullValue { column: name, row });
                }
                let ts = DateTime::from_timestamp_micros(arr.value(row))
                    .ok_or(SourceError::InvalidTimestamp { column: name, row })?;
                values.push(ts.naive_utc());
            }
        }
        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            let arr = col
                .as_any()
                .downcast_ref::<TimestampMillisecondArray>()
                .ok_or_else(|| type_error(name, col))?;
            for row in 0..arr.len() {
                if arr.is_null(row) {
                    return Err(SourceError::NullValue { column: name, row });
                }
                let ts = DateTime::from_timestamp_millis(arr.value(row))
                    .ok_or(SourceError::InvalidTimestamp { column: name, row })?;
                values.push(ts.naive_utc());
            }
        }
        DataType::Timestamp(TimeUnit::Nanosecond, _) => {
            let arr = col
                .as_any()
                .downcast_ref::<TimestampNanosecondArray>()
                .ok_or_else(|| type_error(name, col))?;
            for row in 0..arr.len() {
                if arr.is_null(row) {
                    return Err(SourceError::NullValue { column: name, row });
                }
                values.push(DateTime::from_timestamp_nanos(arr.value(row)).naive_utc());
            }
        }
        _ => return Err(type_error(name, col)),
    }

    Ok(values)
}
