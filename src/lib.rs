//! tripgraph - batch ETL from TLC trip files into a Neo4j trip graph
//!
//! One run reads a Parquet batch of taxi trips, keeps the trips whose pickup
//! and dropoff both fall inside a zone allow-set, stages the survivors as a
//! CSV in the store's import directory, and bulk-loads them as a graph:
//! `(:PickupLocation)-[:STARTS_TRIP]->(:Trip)-[:ENDS_TRIP]->(:DropoffLocation)`.
//!
//! The pipeline is a one-shot batch job: uniqueness constraints are ensured
//! up front, replace mode wipes the store before loading, and the whole
//! sequence retries from scratch on failure up to a configured budget.

pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod model;
pub mod pipeline;
pub mod source;
pub mod staging;
pub mod zones;

// Re-export commonly used types
pub use config::{ConfigError, LoadMode, PipelineConfig};
pub use error::{PipelineError, Result};
pub use filter::TripFilter;
pub use graph::{GraphClient, GraphError};
pub use model::TripRecord;
pub use pipeline::{Pipeline, PipelineStage, RunReport};
pub use source::SourceError;
pub use staging::StageError;
pub use zones::ZoneSet;
