use async_trait::async_trait;
use tracing::info;

use supplygraph_common::{EntityLabel, SupplyGraphError};

use crate::migrate::{clear_database, migrate};
use crate::planner::{GraphOp, NodeRef};
use crate::{GraphClient, GraphReader, GraphWriter};

/// An edge reduced to the ids of its two endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeEndpoints {
    pub start_id: String,
    pub end_id: String,
}

/// An edge with the display data of both endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDetail {
    pub start_labels: Vec<String>,
    pub start_name: String,
    pub product: String,
    pub location: String,
    pub end_labels: Vec<String>,
    pub end_name: String,
}

/// A T2_Supplier → Supplier → Restaurant path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyChain {
    pub t2_name: String,
    pub t2_product: String,
    pub t2_location: String,
    pub supplier_name: String,
    pub product: String,
    pub location: String,
    pub restaurant_name: String,
}

/// The graph-store operations the pipeline depends on.
///
/// Writes are idempotent upserts: applying the same sequence twice leaves
/// the same nodes and edges as applying it once.
#[async_trait]
pub trait SupplyGraphStore: Send + Sync {
    /// Declare per-label uniqueness of `id`.
    async fn ensure_schema(&self) -> Result<(), SupplyGraphError>;

    /// Merge a node on `(id, name)`. An id already held by a different name
    /// is an error.
    async fn upsert_node(
        &self,
        label: EntityLabel,
        id: &str,
        name: &str,
    ) -> Result<(), SupplyGraphError>;

    async fn merge_edge(
        &self,
        from: &NodeRef,
        to: &NodeRef,
        product: &str,
        location: &str,
    ) -> Result<(), SupplyGraphError>;

    async fn supply_edges(&self) -> Result<Vec<EdgeEndpoints>, SupplyGraphError>;

    async fn edges_touching(
        &self,
        node_ids: &[String],
    ) -> Result<Vec<EdgeDetail>, SupplyGraphError>;

    async fn supply_chains(&self) -> Result<Vec<SupplyChain>, SupplyGraphError>;

    /// Remove everything. Only reached through an explicit reset.
    async fn clear(&self) -> Result<(), SupplyGraphError>;

    async fn apply(&self, op: &GraphOp) -> Result<(), SupplyGraphError> {
        match op {
            GraphOp::UpsertNode { label, id, name } => self.upsert_node(*label, id, name).await,
            GraphOp::MergeEdge {
                from,
                to,
                product,
                location,
            } => self.merge_edge(from, to, product, location).await,
        }
    }
}

/// Neo4j-backed store over the bolt driver.
pub struct Neo4jStore {
    client: GraphClient,
    writer: GraphWriter,
    reader: GraphReader,
}

impl Neo4jStore {
    pub fn new(client: GraphClient) -> Self {
        Self {
            writer: GraphWriter::new(client.clone()),
            reader: GraphReader::new(client.clone()),
            client,
        }
    }

    pub fn client(&self) -> &GraphClient {
        &self.client
    }

    /// Connect and wrap in one step.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, SupplyGraphError> {
        let client = GraphClient::connect(uri, user, password)
            .await
            .map_err(graph_err)?;
        info!(uri, "Connected to Neo4j");
        Ok(Self::new(client))
    }
}

fn graph_err(e: neo4rs::Error) -> SupplyGraphError {
    SupplyGraphError::Graph(e.to_string())
}

#[async_trait]
impl SupplyGraphStore for Neo4jStore {
    async fn ensure_schema(&self) -> Result<(), SupplyGraphError> {
        migrate(&self.client).await.map_err(graph_err)
    }

    async fn upsert_node(
        &self,
        label: EntityLabel,
        id: &str,
        name: &str,
    ) -> Result<(), SupplyGraphError> {
        self.writer
            .upsert_node(label, id, name)
            .await
            .map_err(graph_err)
    }

    async fn merge_edge(
        &self,
        from: &NodeRef,
        to: &NodeRef,
        product: &str,
        location: &str,
    ) -> Result<(), SupplyGraphError> {
        self.writer
            .merge_edge(from, to, product, location)
            .await
            .map_err(graph_err)
    }

    async fn supply_edges(&self) -> Result<Vec<EdgeEndpoints>, SupplyGraphError> {
        self.reader.supply_edges().await.map_err(graph_err)
    }

    async fn edges_touching(
        &self,
        node_ids: &[String],
    ) -> Result<Vec<EdgeDetail>, SupplyGraphError> {
        self.reader.edges_touching(node_ids).await.map_err(graph_err)
    }

    async fn supply_chains(&self) -> Result<Vec<SupplyChain>, SupplyGraphError> {
        self.reader.supply_chains().await.map_err(graph_err)
    }

    async fn clear(&self) -> Result<(), SupplyGraphError> {
        clear_database(&self.client).await.map_err(graph_err)
    }
}
