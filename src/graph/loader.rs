//! Bulk load of staged trips
//!
//! The whole staged batch runs inside one write transaction: every row
//! commits or none do. Location nodes and relationships are merged by key so
//! repeated ids reuse existing nodes; trip nodes are always created fresh,
//! with the uniqueness constraint on `pickup_datetime` rejecting duplicates.

use super::{GraphClient, GraphError, GraphResult};

/// Cypher for loading one staged file, referenced by bare name and resolved
/// by the store against its own import root.
pub fn load_query(file_name: &str) -> String {
    format!(
        "LOAD CSV WITH HEADERS FROM 'file:///{file_name}' AS row \
         MERGE (p:PickupLocation {{id: toInteger(row.PULocationID)}}) \
         MERGE (d:DropoffLocation {{id: toInteger(row.DOLocationID)}}) \
         CREATE (t:Trip {{\
            pickup_datetime: row.tpep_pickup_datetime, \
            dropoff_datetime: row.tpep_dropoff_datetime, \
            trip_distance: toFloat(row.trip_distance), \
            fare_amount: toFloat(row.fare_amount)}}) \
         MERGE (p)-[:STARTS_TRIP]->(t) \
         MERGE (t)-[:ENDS_TRIP]->(d)"
    )
}

/// Load a staged file into the graph inside a single write transaction.
pub async fn load_staged(client: &GraphClient, file_name: &str) -> GraphResult<()> {
    let txn_error = |e: neo4rs::Error| GraphError::TransactionFailed(e.to_string());

    let mut txn = client.graph().start_txn().await.map_err(txn_error)?;
    txn.run(neo4rs::query(&load_query(file_name)))
        .await
        .map_err(txn_error)?;
    txn.commit().await.map_err(txn_error)?;

    tracing::info!(file = file_name, "Loaded staged trips into the graph");
    Ok(())
}
