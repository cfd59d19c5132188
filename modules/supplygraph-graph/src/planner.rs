use tracing::{debug, info};

use supplygraph_common::{normalize_name, EntityLabel, ReclassifiedArticle, Role};

use crate::resolver::RunContext;

/// A node addressed by label and id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef {
    pub label: EntityLabel,
    pub id: String,
}

/// One idempotent mutation against the graph store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphOp {
    /// Merge the node on `(label, id, name)`; fails if the id is already held
    /// by another name.
    UpsertNode {
        label: EntityLabel,
        id: String,
        name: String,
    },
    /// Create a `SUPPLIES` edge unless one with the same
    /// `(from, to, product, location)` already exists.
    MergeEdge {
        from: NodeRef,
        to: NodeRef,
        product: String,
        location: String,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlanStats {
    pub relationships: usize,
    pub nodes: usize,
    pub edges: usize,
    pub skipped: usize,
}

/// Ordered operations for one run.
#[derive(Debug, Default, Clone)]
pub struct MutationPlan {
    pub ops: Vec<GraphOp>,
    pub stats: PlanStats,
}

/// Turns reclassified relationships into node upserts and edge merges.
///
/// Each relationship resolves its present parties in the order supplier,
/// buyer, T2_supplier; a node upsert is emitted the first time a
/// `(label, name)` pair is seen. At most one edge follows: T2_Supplier →
/// Supplier for tier-two relationships, Supplier → Restaurant otherwise, and
/// nothing when either party is missing.
pub struct GraphMutationPlanner<'a> {
    ctx: &'a mut RunContext,
}

impl<'a> GraphMutationPlanner<'a> {
    pub fn new(ctx: &'a mut RunContext) -> Self {
        Self { ctx }
    }

    pub fn plan(&mut self, articles: &[ReclassifiedArticle]) -> MutationPlan {
        let mut plan = MutationPlan::default();

        for relationship in articles.iter().flat_map(|a| a.relationships.iter()) {
            plan.stats.relationships += 1;
            let mut resolved: Vec<(Role, NodeRef)> = Vec::with_capacity(2);

            for (role, name) in relationship.parties() {
                let label = role.label();
                let resolution = self.ctx.resolver.resolve(name, role);
                if resolution.is_new {
                    plan.ops.push(GraphOp::UpsertNode {
                        label,
                        id: resolution.id.clone(),
                        name: normalize_name(name),
                    });
                    plan.stats.nodes += 1;
                }
                resolved.push((role, NodeRef { label, id: resolution.id }));
            }

            let Some((from_role, to_role)) = relationship.edge_roles() else {
                debug!(?relationship, "Relationship has no complete party pair, skipping edge");
                plan.stats.skipped += 1;
                continue;
            };

            let node_for = |role: Role| {
                resolved
                    .iter()
                    .find(|(r, _)| *r == role)
                    .map(|(_, node)| node.clone())
            };
            let (Some(from), Some(to)) = (node_for(from_role), node_for(to_role)) else {
                plan.stats.skipped += 1;
                continue;
            };

            plan.ops.push(GraphOp::MergeEdge {
                from,
                to,
                product: normalize_name(relationship.product()),
                location: normalize_name(relationship.location()),
            });
            plan.stats.edges += 1;
        }

        info!(
            relationships = plan.stats.relationships,
            nodes = plan.stats.nodes,
            edges = plan.stats.edges,
            skipped = plan.stats.skipped,
            "Mutation plan built"
        );

        plan
    }
}
