use tracing::info;

use supplygraph_common::SupplyGraphError;

use crate::cluster::Cluster;
use crate::store::{EdgeDetail, SupplyChain, SupplyGraphStore};

/// Sentences generated from the graph, ready for embedding.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub sentences: Vec<String>,
    pub cluster_sentences: usize,
    pub chain_sentences: usize,
}

impl Corpus {
    /// One sentence per line, each line newline-terminated.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.sentences.iter().map(|s| s.len() + 1).sum());
        for sentence in &self.sentences {
            text.push_str(sentence);
            text.push('\n');
        }
        text
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Primary (first) label of a node, as reported by the store.
fn primary_label(labels: &[String]) -> &str {
    labels.first().map(|s| s.as_str()).unwrap_or_default()
}

pub fn edge_sentence(edge: &EdgeDetail) -> String {
    format!(
        "A {} named {} supplies {} in the location {} to a {} named {}.",
        primary_label(&edge.start_labels),
        edge.start_name,
        edge.product,
        edge.location,
        primary_label(&edge.end_labels),
        edge.end_name,
    )
}

pub fn chain_sentence(chain: &SupplyChain) -> String {
    format!(
        "A T2_Supplier named {t2} supplies {t2_product} in the location {t2_location} \
         to a Supplier named {supplier}, this Supplier named {supplier} then supplies \
         {product} in the location {location} to a Restaurant named {restaurant}.",
        t2 = chain.t2_name,
        t2_product = chain.t2_product,
        t2_location = chain.t2_location,
        supplier = chain.supplier_name,
        product = chain.product,
        location = chain.location,
        restaurant = chain.restaurant_name,
    )
}

/// Turns clusters and two-hop chains into plain-language sentences.
pub struct PathNarrator<'a> {
    store: &'a dyn SupplyGraphStore,
}

impl<'a> PathNarrator<'a> {
    pub fn new(store: &'a dyn SupplyGraphStore) -> Self {
        Self { store }
    }

    /// Cluster sentences first, in cluster order, then every full chain.
    ///
    /// A cluster's sentences cover every edge with at least one endpoint in
    /// the cluster, so neighbours outside it appear as context.
    pub async fn narrate(&self, clusters: &[Cluster]) -> Result<Corpus, SupplyGraphError> {
        let mut corpus = Corpus::default();

        for cluster in clusters {
            let edges = self.store.edges_touching(&cluster.ids()).await?;
            corpus.cluster_sentences += edges.len();
            corpus.sentences.extend(edges.iter().map(edge_sentence));
        }

        let chains = self.store.supply_chains().await?;
        corpus.chain_sentences = chains.len();
        corpus.sentences.extend(chains.iter().map(chain_sentence));

        info!(
            clusters = clusters.len(),
            cluster_sentences = corpus.cluster_sentences,
            chain_sentences = corpus.chain_sentences,
            "Narrative corpus generated"
        );

        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_sentence_uses_primary_labels() {
        let edge = EdgeDetail {
            start_labels: vec!["Supplier".into(), "Extra".into()],
            start_name: "The Chiltern Firehouse".into(),
            product: "Wine".into(),
            location: "France".into(),
            end_labels: vec!["Restaurant".into()],
            end_name: "Acme Distributors".into(),
        };
        assert_eq!(
            edge_sentence(&edge),
            "A Supplier named The Chiltern Firehouse supplies Wine in the location France \
             to a Restaurant named Acme Distributors."
        );
    }

    #[test]
    fn edge_sentence_keeps_empty_properties() {
        let edge = EdgeDetail {
            start_labels: vec!["T2_Supplier".into()],
            start_name: "Grain Co".into(),
            product: String::new(),
            location: String::new(),
            end_labels: vec!["Supplier".into()],
            end_name: "Mill".into(),
        };
        assert_eq!(
            edge_sentence(&edge),
            "A T2_Supplier named Grain Co supplies  in the location  to a Supplier named Mill."
        );
    }

    #[test]
    fn chain_sentence_names_supplier_twice() {
        let chain = SupplyChain {
            t2_name: "Hg Walter".into(),
            t2_product: "Meat".into(),
            t2_location: "London".into(),
            supplier_name: "The Chiltern Firehouse".into(),
            product: "Wine".into(),
            location: "France".into(),
            restaurant_name: "Acme Distributors".into(),
        };
        assert_eq!(
            chain_sentence(&chain),
            "A T2_Supplier named Hg Walter supplies Meat in the location London to a Supplier \
             named The Chiltern Firehouse, this Supplier named The Chiltern Firehouse then \
             supplies Wine in the location France to a Restaurant named Acme Distributors."
        );
    }

    #[test]
    fn corpus_text_terminates_every_line() {
        let corpus = Corpus {
            sentences: vec!["one.".into(), "two.".into()],
            cluster_sentences: 2,
            chain_sentences: 0,
        };
        assert_eq!(corpus.to_text(), "one.\ntwo.\n");
        assert_eq!(Corpus::default().to_text(), "");
    }
}
