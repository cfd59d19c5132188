// End-to-end pipeline tests against the in-memory store.
//
// Run with: cargo test -p supplygraph-graph --test pipeline_test

use supplygraph_common::{Article, EntityLabel, RelationshipRecord, SupplyGraphError};
use supplygraph_graph::{build_corpus, ingest, MemoryStore, SupplyGraphStore};

fn article(url: &str, rels: Vec<RelationshipRecord>) -> Article {
    Article {
        url: url.to_string(),
        text: String::new(),
        relationships: rels,
    }
}

fn scenario_a() -> Vec<Article> {
    vec![
        article(
            "https://news.example/1",
            vec![RelationshipRecord::new("Hg Walter", "The Chiltern Firehouse", "Meat", "London")],
        ),
        article(
            "https://news.example/2",
            vec![RelationshipRecord::new(
                "The Chiltern Firehouse",
                "Acme Distributors",
                "Wine",
                "France",
            )],
        ),
    ]
}

fn four_node_corpus() -> Vec<Article> {
    vec![
        article(
            "https://news.example/farm",
            vec![
                RelationshipRecord::new("Farm", "Bistro", "Eggs", "Kent"),
                RelationshipRecord::new("Dairy", "Bistro", "Milk", "Devon"),
            ],
        ),
        article(
            "https://news.example/cafe",
            vec![
                RelationshipRecord::new("Farm", "Cafe", "Eggs", "Kent"),
                RelationshipRecord::new("X", "Y", "Salt", "Anglesey"),
            ],
        ),
    ]
}

#[tokio::test]
async fn scenario_a_builds_two_tier_chain() {
    let store = MemoryStore::new();
    let stats = ingest(&store, scenario_a()).await.unwrap();

    assert_eq!(stats.second_order_entities, 1);
    assert_eq!(stats.tier_two_relationships, 1);
    assert_eq!(store.node_count(), 3);
    assert_eq!(store.edge_count(), 2);
    assert_eq!(
        store.node_name(EntityLabel::T2Supplier, "t2__1").as_deref(),
        Some("Hg Walter")
    );
    assert_eq!(
        store.node_name(EntityLabel::Supplier, "sup_1").as_deref(),
        Some("The Chiltern Firehouse")
    );
    assert_eq!(
        store.node_name(EntityLabel::Restaurant, "buy_1").as_deref(),
        Some("Acme Distributors")
    );

    let edges = store.supply_edges().await.unwrap();
    let pairs: Vec<(&str, &str)> = edges
        .iter()
        .map(|e| (e.start_id.as_str(), e.end_id.as_str()))
        .collect();
    assert_eq!(pairs, vec![("sup_1", "buy_1"), ("t2__1", "sup_1")]);
}

#[tokio::test]
async fn scenario_a_corpus_has_only_the_chain() {
    // Three nodes: below the cluster threshold, so only the chain is narrated.
    let store = MemoryStore::new();
    ingest(&store, scenario_a()).await.unwrap();

    let corpus = build_corpus(&store).await.unwrap();
    assert_eq!(corpus.cluster_sentences, 0);
    assert_eq!(
        corpus.to_text(),
        "A T2_Supplier named Hg Walter supplies Meat in the location London to a Supplier named \
         The Chiltern Firehouse, this Supplier named The Chiltern Firehouse then supplies Wine in \
         the location France to a Restaurant named Acme Distributors.\n"
    );
}

#[tokio::test]
async fn scenario_b_banned_only_article_contributes_nothing() {
    let store = MemoryStore::new();
    let banned = RelationshipRecord::new("Restaurants", "X", "", "");
    let stats = ingest(&store, vec![article("https://news.example/b", vec![banned])])
        .await
        .unwrap();

    assert_eq!(stats.articles_kept, 0);
    assert_eq!(stats.relationships_dropped, 1);
    assert_eq!(store.node_count(), 0);
    assert_eq!(store.edge_count(), 0);
}

#[tokio::test]
async fn reingest_is_idempotent() {
    let store = MemoryStore::new();
    ingest(&store, four_node_corpus()).await.unwrap();
    let (nodes, edges) = (store.node_count(), store.edge_count());
    let first = store.supply_edges().await.unwrap();

    ingest(&store, four_node_corpus()).await.unwrap();
    assert_eq!(store.node_count(), nodes);
    assert_eq!(store.edge_count(), edges);
    assert_eq!(store.supply_edges().await.unwrap(), first);
}

#[tokio::test]
async fn four_node_component_is_narrated() {
    let store = MemoryStore::new();
    ingest(&store, four_node_corpus()).await.unwrap();

    let corpus = build_corpus(&store).await.unwrap();
    assert_eq!(corpus.chain_sentences, 0);
    assert_eq!(
        corpus.sentences,
        vec![
            "A Supplier named Farm supplies Eggs in the location Kent to a Restaurant named \
             Bistro.",
            "A Supplier named Farm supplies Eggs in the location Kent to a Restaurant named \
             Cafe.",
            "A Supplier named Dairy supplies Milk in the location Devon to a Restaurant named \
             Bistro.",
        ]
    );
}

#[tokio::test]
async fn buyer_that_also_supplies_becomes_one_supplier_node() {
    let store = MemoryStore::new();
    ingest(
        &store,
        vec![article(
            "https://news.example/acme",
            vec![
                RelationshipRecord::new("Farm", "Acme", "Eggs", ""),
                RelationshipRecord::new("Acme", "Bistro", "Eggs", ""),
            ],
        )],
    )
    .await
    .unwrap();

    // Acme is second-order: relationship 1 becomes Farm(T2) -> Acme(Supplier).
    assert_eq!(
        store.node_name(EntityLabel::Supplier, "sup_1").as_deref(),
        Some("Acme")
    );
    assert_eq!(
        store.node_name(EntityLabel::T2Supplier, "t2__1").as_deref(),
        Some("Farm")
    );
    assert_eq!(store.node_count(), 3);
}

#[tokio::test]
async fn partyless_article_is_not_kept() {
    let store = MemoryStore::new();
    let partyless = RelationshipRecord {
        product: Some("Eggs".into()),
        ..Default::default()
    };
    let stats = ingest(&store, vec![article("https://news.example/p", vec![partyless])])
        .await
        .unwrap();

    assert_eq!(stats.articles_in, 1);
    assert_eq!(stats.articles_kept, 0);
    assert_eq!(stats.relationships_dropped, 1);
    assert_eq!(store.node_count(), 0);
}

#[tokio::test]
async fn second_corpus_reusing_ids_for_other_names_fails() {
    // Ids restart per run, so Mill takes sup_1, which Farm already holds.
    let store = MemoryStore::new();
    let first = vec![article(
        "https://news.example/1",
        vec![RelationshipRecord::new("Farm", "Bistro", "Eggs", "Kent")],
    )];
    ingest(&store, first).await.unwrap();

    let second = vec![article(
        "https://news.example/2",
        vec![
            RelationshipRecord::new("Mill", "Cafe", "Flour", "Leeds"),
            RelationshipRecord::new("Farm", "Bistro", "Eggs", "Kent"),
        ],
    )];
    let err = ingest(&store, second).await.unwrap_err();
    assert!(matches!(err, SupplyGraphError::Graph(_)));

    assert_eq!(
        store.node_name(EntityLabel::Supplier, "sup_1").as_deref(),
        Some("Farm")
    );
    let edges = store.edges_touching(&["sup_1".to_string()]).await.unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].end_name, "Bistro");
}
