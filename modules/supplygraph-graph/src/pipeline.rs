use std::fmt;

use tracing::{debug, info};

use supplygraph_common::{Article, SupplyGraphError};

use crate::cluster::find_clusters;
use crate::narrator::{Corpus, PathNarrator};
use crate::planner::GraphMutationPlanner;
use crate::reclassify::{filter_banned_entities, TierReclassifier};
use crate::resolver::RunContext;
use crate::store::SupplyGraphStore;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestStats {
    pub articles_in: usize,
    pub articles_kept: usize,
    pub relationships_dropped: usize,
    pub second_order_entities: usize,
    pub tier_two_relationships: usize,
    pub nodes_upserted: usize,
    pub edges_merged: usize,
    pub relationships_skipped: usize,
}

impl fmt::Display for IngestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Ingest Complete ===")?;
        writeln!(f, "Articles read:          {}", self.articles_in)?;
        writeln!(f, "Articles kept:          {}", self.articles_kept)?;
        writeln!(f, "Relationships dropped:  {}", self.relationships_dropped)?;
        writeln!(f, "Second-order entities:  {}", self.second_order_entities)?;
        writeln!(f, "Tier-two relationships: {}", self.tier_two_relationships)?;
        writeln!(f, "Nodes upserted:         {}", self.nodes_upserted)?;
        writeln!(f, "Edges merged:           {}", self.edges_merged)?;
        writeln!(f, "Relationships skipped:  {}", self.relationships_skipped)?;
        Ok(())
    }
}

/// Filter, reclassify, resolve and plan the corpus, then apply the plan.
///
/// Every stage consumes the whole output of the previous one. The first
/// store error aborts the run; whatever was written up to that point stays,
/// and a re-run converges because every write is a merge.
pub async fn ingest(
    store: &dyn SupplyGraphStore,
    articles: Vec<Article>,
) -> Result<IngestStats, SupplyGraphError> {
    let (articles, filter) = filter_banned_entities(articles);

    let tiers = TierReclassifier::from_corpus(&articles);
    let reclassified = tiers.reclassify(articles);

    let mut ctx = RunContext::new();
    let plan = GraphMutationPlanner::new(&mut ctx).plan(&reclassified);
    for entity in ctx.resolver.entities() {
        debug!(
            id = entity.id.as_str(),
            label = %entity.label,
            name = entity.name.as_str(),
            "Resolved entity"
        );
    }

    store.ensure_schema().await?;
    for op in &plan.ops {
        store.apply(op).await?;
    }

    let stats = IngestStats {
        articles_in: filter.articles_in,
        articles_kept: reclassified.len(),
        relationships_dropped: filter.relationships_dropped,
        second_order_entities: tiers.second_order().len(),
        tier_two_relationships: reclassified
            .iter()
            .flat_map(|a| a.relationships.iter())
            .filter(|r| r.is_tier_two())
            .count(),
        nodes_upserted: plan.stats.nodes,
        edges_merged: plan.stats.edges,
        relationships_skipped: plan.stats.skipped,
    };

    info!(
        ops = plan.ops.len(),
        entities = ctx.resolver.len(),
        "All data applied to graph store"
    );

    Ok(stats)
}

/// Read the committed graph back, cluster it and narrate it.
pub async fn build_corpus(store: &dyn SupplyGraphStore) -> Result<Corpus, SupplyGraphError> {
    let edges = store.supply_edges().await?;
    let clusters = find_clusters(&edges);
    PathNarrator::new(store).narrate(&clusters).await
}
