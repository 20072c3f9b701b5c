//! Bolt connection handling

use neo4rs::{Graph, Query};

use super::{GraphError, GraphResult};
use crate::config::Neo4jSection;

/// Long-lived handle to the graph store.
///
/// Connectivity is verified eagerly at construction so an unreachable or
/// misconfigured store fails the run before any data is touched. The
/// underlying `neo4rs` pool is released when the client is dropped.
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect and verify connectivity.
    pub async fn connect(config: &Neo4jSection) -> GraphResult<Self> {
        let graph = Graph::new(&config.uri, &config.user, &config.password)
            .await
            .map_err(|e| GraphError::ConnectionFailed(e.to_string()))?;

        let client = Self { graph };
        client.verify_connectivity().await?;
        tracing::debug!(uri = %config.uri, "Connected to graph store");
        Ok(client)
    }

    async fn verify_connectivity(&self) -> GraphResult<()> {
        self.graph
            .run(neo4rs::query("RETURN 1"))
            .await
            .map_err(|e| GraphError::ConnectionFailed(e.to_string()))
    }

    /// Run a query, discarding any result rows.
    pub async fn run(&self, query: Query) -> GraphResult<()> {
        self.graph
            .run(query)
            .await
            .map_err(|e| GraphError::QueryFailed(e.to_string()))
    }

    /// Access the underlying driver (for transactions and result streams).
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}
