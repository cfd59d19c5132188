use std::collections::HashSet;

use tracing::{debug, info};

use supplygraph_common::{
    normalize_name, Article, ReclassifiedArticle, RelationshipRecord, RelationshipVariant,
};

/// Counts from the banned-entity filter.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterStats {
    pub articles_in: usize,
    pub articles_dropped: usize,
    pub relationships_in: usize,
    pub relationships_dropped: usize,
}

/// Remove every relationship that names a banned party or names neither a
/// supplier nor a buyer, then drop articles left with no relationships.
pub fn filter_banned_entities(articles: Vec<Article>) -> (Vec<Article>, FilterStats) {
    let mut stats = FilterStats {
        articles_in: articles.len(),
        ..Default::default()
    };

    let kept: Vec<Article> = articles
        .into_iter()
        .filter_map(|mut article| {
            stats.relationships_in += article.relationships.len();
            let before = article.relationships.len();
            article
                .relationships
                .retain(|r| r.has_party() && !r.names_banned_party());
            stats.relationships_dropped += before - article.relationships.len();

            if article.relationships.is_empty() {
                debug!(
                    url = article.url.as_str(),
                    "Article has no usable relationships, dropping"
                );
                stats.articles_dropped += 1;
                None
            } else {
                Some(article)
            }
        })
        .collect();

    info!(
        articles_in = stats.articles_in,
        articles_dropped = stats.articles_dropped,
        relationships_dropped = stats.relationships_dropped,
        "Relationship filter applied"
    );

    (kept, stats)
}

/// Names that appear as a supplier somewhere and as a buyer somewhere,
/// across the whole corpus. Compared after apostrophe stripping.
pub fn second_order_entities(articles: &[Article]) -> HashSet<String> {
    let mut suppliers = HashSet::new();
    let mut buyers = HashSet::new();

    for r in articles.iter().flat_map(|a| a.relationships.iter()) {
        if let Some(s) = &r.supplier {
            suppliers.insert(normalize_name(s));
        }
        if let Some(b) = &r.buyer {
            buyers.insert(normalize_name(b));
        }
    }

    suppliers.intersection(&buyers).cloned().collect()
}

/// Promotes the supplying side of a relationship to tier two when its buyer
/// is itself a supplier elsewhere in the corpus.
///
/// Matching is by name only. Two unrelated parties that share a name are
/// treated as one entity.
#[derive(Debug, Clone)]
pub struct TierReclassifier {
    second_order: HashSet<String>,
}

impl TierReclassifier {
    /// Build from the filtered corpus. Must see every article before any
    /// relationship is classified.
    pub fn from_corpus(articles: &[Article]) -> Self {
        let second_order = second_order_entities(articles);
        info!(count = second_order.len(), "Second-order entities detected");
        Self { second_order }
    }

    pub fn second_order(&self) -> &HashSet<String> {
        &self.second_order
    }

    pub fn classify(&self, r: RelationshipRecord) -> RelationshipVariant {
        match r.buyer {
            Some(buyer) if self.second_order.contains(&normalize_name(&buyer)) => {
                RelationshipVariant::TierTwo {
                    t2_supplier: r.supplier,
                    supplier: buyer,
                    product: r.product,
                    location: r.location,
                }
            }
            buyer => RelationshipVariant::TierOne {
                supplier: r.supplier,
                buyer,
                product: r.product,
                location: r.location,
            },
        }
    }

    pub fn reclassify(&self, articles: Vec<Article>) -> Vec<ReclassifiedArticle> {
        articles
            .into_iter()
            .map(|a| ReclassifiedArticle {
                url: a.url,
                relationships: a
                    .relationships
                    .into_iter()
                    .map(|r| self.classify(r))
                    .collect(),
            })
            .collect()
    }
}
