use neo4rs::query;

use supplygraph_common::SUPPLIES;

use crate::store::{EdgeDetail, EdgeEndpoints, SupplyChain};
use crate::GraphClient;

/// Read-side queries used by clustering and narration.
pub struct GraphReader {
    client: GraphClient,
}

impl GraphReader {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// Every SUPPLIES edge reduced to its endpoint ids.
    pub async fn supply_edges(&self) -> Result<Vec<EdgeEndpoints>, neo4rs::Error> {
        let q = query(&format!(
            "MATCH (n)-[:{SUPPLIES}]->(m)
             RETURN n.id AS start_id, m.id AS end_id
             ORDER BY start_id, end_id"
        ));

        let mut edges = Vec::new();
        let mut stream = self.client.execute(q).await?;
        while let Some(row) = stream.next().await? {
            edges.push(EdgeEndpoints {
                start_id: row.get("start_id").unwrap_or_default(),
                end_id: row.get("end_id").unwrap_or_default(),
            });
        }

        Ok(edges)
    }

    /// Edges with at least one endpoint in `node_ids`, including edges out to
    /// nodes beyond the set.
    pub async fn edges_touching(
        &self,
        node_ids: &[String],
    ) -> Result<Vec<EdgeDetail>, neo4rs::Error> {
        let q = query(&format!(
            "MATCH (n)-[r:{SUPPLIES}]->(m)
             WHERE n.id IN $node_ids OR m.id IN $node_ids
             RETURN labels(n) AS start_labels, n.name AS start_name, n.id AS start_id,
                    r.product AS product, r.location AS location,
                    labels(m) AS end_labels, m.name AS end_name, m.id AS end_id
             ORDER BY start_id, end_id, product, location"
        ))
        .param("node_ids", node_ids.to_vec());

        let mut details = Vec::new();
        let mut stream = self.client.execute(q).await?;
        while let Some(row) = stream.next().await? {
            details.push(EdgeDetail {
                start_labels: row.get("start_labels").unwrap_or_default(),
                start_name: row.get("start_name").unwrap_or_default(),
                product: row.get("product").unwrap_or_default(),
                location: row.get("location").unwrap_or_default(),
                end_labels: row.get("end_labels").unwrap_or_default(),
                end_name: row.get("end_name").unwrap_or_default(),
            });
        }

        Ok(details)
    }

    /// Every T2_Supplier → Supplier → Restaurant path.
    pub async fn supply_chains(&self) -> Result<Vec<SupplyChain>, neo4rs::Error> {
        let q = query(&format!(
            "MATCH (t2:T2_Supplier)-[r1:{SUPPLIES}]->(s:Supplier)-[r2:{SUPPLIES}]->(rest:Restaurant)
             RETURN t2.name AS t2_name, r1.product AS t2_product, r1.location AS t2_location,
                    s.name AS supplier_name, r2.product AS product, r2.location AS location,
                    rest.name AS restaurant_name
             ORDER BY t2.id, s.id, rest.id, t2_product, t2_location, product, location"
        ));

        let mut chains = Vec::new();
        let mut stream = self.client.execute(q).await?;
        while let Some(row) = stream.next().await? {
            chains.push(SupplyChain {
                t2_name: row.get("t2_name").unwrap_or_default(),
                t2_product: row.get("t2_product").unwrap_or_default(),
                t2_location: row.get("t2_location").unwrap_or_default(),
                supplier_name: row.get("supplier_name").unwrap_or_default(),
                product: row.get("product").unwrap_or_default(),
                location: row.get("location").unwrap_or_default(),
                restaurant_name: row.get("restaurant_name").unwrap_or_default(),
            });
        }

        Ok(chains)
    }
}
