//! Neo4j backend: connection handling, schema management, bulk load
//!
//! The store is treated as a transactional query engine reached over Bolt.
//! [`client::GraphClient`] owns the long-lived connection, [`schema`] keeps
//! the uniqueness constraints in place (and implements the destructive
//! replace-mode wipe), and [`loader`] turns a staged CSV into nodes and
//! relationships inside a single write transaction.

pub mod client;
pub mod loader;
pub mod schema;

pub use client::GraphClient;
pub use loader::load_staged;
pub use schema::{ensure_constraints, wipe};

/// Re-export for downstream code that needs raw Cypher access (e.g. test assertions).
pub use neo4rs::query;

/// Error type for graph store operations
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Failed to connect or authenticate
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Write transaction failed or was rolled back
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

/// Result type for graph store operations
pub type GraphResult<T> = Result<T, GraphError>;
