use neo4rs::query;

use supplygraph_common::{EntityLabel, SUPPLIES};

use crate::planner::NodeRef;
use crate::GraphClient;

/// Write-side wrapper for the supply graph. Every statement is a MERGE, so
/// replaying a plan against the same store is a no-op.
pub struct GraphWriter {
    client: GraphClient,
}

impl GraphWriter {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// Merge the node on `(id, name)`. An id already held by a different name
    /// fails on the uniqueness constraint.
    pub async fn upsert_node(
        &self,
        label: EntityLabel,
        id: &str,
        name: &str,
    ) -> Result<(), neo4rs::Error> {
        let q = query(&format!("MERGE (e:{label} {{id: $id, name: $name}})"))
            .param("id", id)
            .param("name", name);

        self.client.run(q).await
    }

    /// Merge a SUPPLIES edge carrying exactly `product` and `location`.
    /// Does nothing if either endpoint is missing.
    pub async fn merge_edge(
        &self,
        from: &NodeRef,
        to: &NodeRef,
        product: &str,
        location: &str,
    ) -> Result<(), neo4rs::Error> {
        let q = query(&format!(
            "MATCH (s:{from_label} {{id: $from_id}}), (b:{to_label} {{id: $to_id}})
             MERGE (s)-[:{SUPPLIES} {{product: $product, location: $location}}]->(b)",
            from_label = from.label,
            to_label = to.label,
        ))
        .param("from_id", from.id.as_str())
        .param("to_id", to.id.as_str())
        .param("product", product)
        .param("location", location);

        self.client.run(q).await
    }
}
