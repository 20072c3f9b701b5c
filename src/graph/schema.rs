//! Uniqueness constraints and the replace-mode wipe

use super::{GraphClient, GraphResult};

/// Uniqueness constraints the store must hold before any load.
const CONSTRAINTS: [&str; 3] = [
    "CREATE CONSTRAINT IF NOT EXISTS FOR (p:PickupLocation) REQUIRE p.id IS UNIQUE",
    "CREATE CONSTRAINT IF NOT EXISTS FOR (d:DropoffLocation) REQUIRE d.id IS UNIQUE",
    "CREATE CONSTRAINT IF NOT EXISTS FOR (t:Trip) REQUIRE t.pickup_datetime IS UNIQUE",
];

/// Declare the uniqueness constraints, creating them only if absent.
/// Safe to call on every run.
pub async fn ensure_constraints(client: &GraphClient) -> GraphResult<()> {
    for statement in CONSTRAINTS {
        client.run(neo4rs::query(statement)).await?;
    }
    tracing::debug!("Uniqueness constraints in place");
    Ok(())
}

/// Delete all nodes and relationships. Destructive, no undo.
pub async fn wipe(client: &GraphClient) -> GraphResult<()> {
    client.run(neo4rs::query("MATCH (n) DETACH DELETE n")).await?;
    tracing::info!("Cleared existing graph data");
    Ok(())
}
