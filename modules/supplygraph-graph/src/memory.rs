use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use supplygraph_common::{EntityLabel, SupplyGraphError};

use crate::planner::NodeRef;
use crate::store::{EdgeDetail, EdgeEndpoints, SupplyChain, SupplyGraphStore};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct StoredEdge {
    from: NodeRef,
    to: NodeRef,
    product: String,
    location: String,
}

#[derive(Debug, Default)]
struct MemoryGraph {
    schema_ready: bool,
    nodes: BTreeMap<NodeRef, String>,
    edges: BTreeSet<StoredEdge>,
}

/// In-process store with the same merge semantics as the Neo4j store.
/// Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryGraph>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.lock().map(|g| g.nodes.len()).unwrap_or(0)
    }

    pub fn edge_count(&self) -> usize {
        self.lock().map(|g| g.edges.len()).unwrap_or(0)
    }

    /// Name stored on a node, if it exists.
    pub fn node_name(&self, label: EntityLabel, id: &str) -> Option<String> {
        let key = NodeRef {
            label,
            id: id.to_string(),
        };
        self.lock().ok()?.nodes.get(&key).cloned()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryGraph>, SupplyGraphError> {
        self.inner
            .lock()
            .map_err(|_| SupplyGraphError::Graph("memory store lock poisoned".to_string()))
    }

    fn sorted_edges(graph: &MemoryGraph) -> Vec<&StoredEdge> {
        let mut edges: Vec<&StoredEdge> = graph.edges.iter().collect();
        edges.sort_by(|a, b| {
            (&a.from.id, &a.to.id, &a.product, &a.location)
                .cmp(&(&b.from.id, &b.to.id, &b.product, &b.location))
        });
        edges
    }
}

#[async_trait]
impl SupplyGraphStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), SupplyGraphError> {
        self.lock()?.schema_ready = true;
        Ok(())
    }

    async fn upsert_node(
        &self,
        label: EntityLabel,
        id: &str,
        name: &str,
    ) -> Result<(), SupplyGraphError> {
        let mut g = self.lock()?;
        if !g.schema_ready {
            return Err(SupplyGraphError::Graph(
                "uniqueness constraints must be declared before upserts".to_string(),
            ));
        }
        let key = NodeRef {
            label,
            id: id.to_string(),
        };
        match g.nodes.get(&key) {
            // MERGE on (id, name) against an id held by another name
            // violates the per-label uniqueness constraint.
            Some(existing) if existing != name => Err(SupplyGraphError::Graph(format!(
                "{label} id {id} already belongs to '{existing}', cannot merge '{name}'"
            ))),
            Some(_) => Ok(()),
            None => {
                g.nodes.insert(key, name.to_string());
                Ok(())
            }
        }
    }

    async fn merge_edge(
        &self,
        from: &NodeRef,
        to: &NodeRef,
        product: &str,
        location: &str,
    ) -> Result<(), SupplyGraphError> {
        let mut g = self.lock()?;
        // MATCH semantics: nothing happens unless both endpoints exist.
        if !g.nodes.contains_key(from) || !g.nodes.contains_key(to) {
            return Ok(());
        }
        g.edges.insert(StoredEdge {
            from: from.clone(),
            to: to.clone(),
            product: product.to_string(),
            location: location.to_string(),
        });
        Ok(())
    }

    async fn supply_edges(&self) -> Result<Vec<EdgeEndpoints>, SupplyGraphError> {
        let g = self.lock()?;
        Ok(Self::sorted_edges(&g)
            .into_iter()
            .map(|e| EdgeEndpoints {
                start_id: e.from.id.clone(),
                end_id: e.to.id.clone(),
            })
            .collect())
    }

    async fn edges_touching(
        &self,
        node_ids: &[String],
    ) -> Result<Vec<EdgeDetail>, SupplyGraphError> {
        let g = self.lock()?;
        let wanted: HashSet<&str> = node_ids.iter().map(|s| s.as_str()).collect();
        let name_of = |node: &NodeRef| g.nodes.get(node).cloned().unwrap_or_default();

        Ok(Self::sorted_edges(&g)
            .into_iter()
            .filter(|e| wanted.contains(e.from.id.as_str()) || wanted.contains(e.to.id.as_str()))
            .map(|e| EdgeDetail {
                start_labels: vec![e.from.label.to_string()],
                start_name: name_of(&e.from),
                product: e.product.clone(),
                location: e.location.clone(),
                end_labels: vec![e.to.label.to_string()],
                end_name: name_of(&e.to),
            })
            .collect())
    }

    async fn supply_chains(&self) -> Result<Vec<SupplyChain>, SupplyGraphError> {
        let g = self.lock()?;
        let name_of = |node: &NodeRef| g.nodes.get(node).cloned().unwrap_or_default();
        let edges = Self::sorted_edges(&g);

        let mut chains = Vec::new();
        for upper in edges.iter().filter(|e| {
            e.from.label == EntityLabel::T2Supplier && e.to.label == EntityLabel::Supplier
        }) {
            for lower in edges
                .iter()
                .filter(|e| e.from == upper.to && e.to.label == EntityLabel::Restaurant)
            {
                chains.push(SupplyChain {
                    t2_name: name_of(&upper.from),
                    t2_product: upper.product.clone(),
                    t2_location: upper.location.clone(),
                    supplier_name: name_of(&upper.to),
                    product: lower.product.clone(),
                    location: lower.location.clone(),
                    restaurant_name: name_of(&lower.to),
                });
            }
        }

        Ok(chains)
    }

    async fn clear(&self) -> Result<(), SupplyGraphError> {
        let mut g = self.lock()?;
        g.nodes.clear();
        g.edges.clear();
        Ok(())
    }
}
