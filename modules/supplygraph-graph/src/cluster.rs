use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use tracing::info;

use supplygraph_common::MIN_CLUSTER_SIZE;

use crate::store::EdgeEndpoints;

/// A connected component of the undirected supply graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub node_ids: BTreeSet<String>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_ids.contains(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.node_ids.iter().cloned().collect()
    }
}

/// Connected components over the undirected projection of `edges`, keeping
/// only components with at least `MIN_CLUSTER_SIZE` nodes.
///
/// Components are discovered by breadth-first search, starting nodes taken
/// in the order they first appear in `edges`.
pub fn find_clusters(edges: &[EdgeEndpoints]) -> Vec<Cluster> {
    find_clusters_with_min(edges, MIN_CLUSTER_SIZE)
}

pub fn find_clusters_with_min(edges: &[EdgeEndpoints], min_size: usize) -> Vec<Cluster> {
    let mut adjacency: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for edge in edges {
        for (a, b) in [
            (edge.start_id.as_str(), edge.end_id.as_str()),
            (edge.end_id.as_str(), edge.start_id.as_str()),
        ] {
            adjacency
                .entry(a)
                .or_insert_with(|| {
                    order.push(a);
                    HashSet::new()
                })
                .insert(b);
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut clusters = Vec::new();
    let mut discarded = 0usize;

    for &start in &order {
        if visited.contains(start) {
            continue;
        }

        let mut component = BTreeSet::new();
        let mut frontier = VecDeque::from([start]);
        visited.insert(start);

        while let Some(current) = frontier.pop_front() {
            component.insert(current.to_string());
            if let Some(neighbours) = adjacency.get(current) {
                for &next in neighbours {
                    if visited.insert(next) {
                        frontier.push_back(next);
                    }
                }
            }
        }

        if component.len() >= min_size {
            clusters.push(Cluster { node_ids: component });
        } else {
            discarded += 1;
        }
    }

    info!(
        nodes = order.len(),
        clusters = clusters.len(),
        discarded,
        "Connected components computed"
    );

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> Vec<EdgeEndpoints> {
        pairs
            .iter()
            .map(|(a, b)| EdgeEndpoints {
                start_id: a.to_string(),
                end_id: b.to_string(),
            })
            .collect()
    }

    fn ids(c: &Cluster) -> Vec<&str> {
        c.node_ids.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn chain_of_three_is_discarded() {
        let clusters = find_clusters(&edges(&[("a", "b"), ("b", "c")]));
        assert!(clusters.is_empty());
    }

    #[test]
    fn chain_of_four_is_one_cluster() {
        let clusters = find_clusters(&edges(&[("a", "b"), ("b", "c"), ("c", "d")]));
        assert_eq!(clusters.len(), 1);
        assert_eq!(ids(&clusters[0]), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn star_is_one_cluster() {
        let star = edges(&[("hub", "x"), ("y", "hub"), ("hub", "z"), ("w", "hub")]);
        let clusters = find_clusters(&star);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 5);
    }

    #[test]
    fn direction_is_ignored() {
        // Two suppliers into one restaurant, which nothing else links:
        // only reachable through the undirected projection.
        let clusters = find_clusters(&edges(&[("s1", "r"), ("s2", "r"), ("t", "s1")]));
        assert_eq!(clusters.len(), 1);
        assert!(clusters[0].contains("s2"));
        assert!(clusters[0].contains("t"));
    }

    #[test]
    fn small_components_never_leak_into_results() {
        let clusters = find_clusters(&edges(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "d"),
            ("x", "y"),
            ("p", "q"),
            ("q", "r"),
        ]));
        assert_eq!(clusters.len(), 1);
        for small in ["x", "y", "p", "q", "r"] {
            assert!(!clusters[0].contains(small));
        }
    }

    #[test]
    fn clusters_are_disjoint_and_complete() {
        let input = edges(&[
            ("a", "b"),
            ("c", "d"),
            ("b", "c"),
            ("e", "f"),
            ("f", "g"),
            ("g", "h"),
            ("h", "e"),
        ]);
        let clusters = find_clusters(&input);
        assert_eq!(clusters.len(), 2);
        assert_eq!(ids(&clusters[0]), vec!["a", "b", "c", "d"]);
        assert_eq!(ids(&clusters[1]), vec!["e", "f", "g", "h"]);
        assert!(clusters[0].node_ids.is_disjoint(&clusters[1].node_ids));
    }

    #[test]
    fn parallel_and_self_edges_do_not_inflate_size() {
        let clusters = find_clusters(&edges(&[("a", "b"), ("a", "b"), ("b", "b"), ("b", "c")]));
        assert!(clusters.is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(find_clusters(&[]).is_empty());
    }

    #[test]
    fn threshold_is_configurable() {
        let clusters = find_clusters_with_min(&edges(&[("a", "b")]), 2);
        assert_eq!(clusters.len(), 1);
    }
}
