pub mod client;
pub mod cluster;
pub mod memory;
pub mod migrate;
pub mod narrator;
pub mod pipeline;
pub mod planner;
pub mod reader;
pub mod reclassify;
pub mod resolver;
pub mod store;
pub mod writer;

#[cfg(feature = "test-utils")]
pub mod testutil;

pub use client::GraphClient;
pub use cluster::{find_clusters, Cluster};
pub use memory::MemoryStore;
pub use narrator::{Corpus, PathNarrator};
pub use pipeline::{build_corpus, ingest, IngestStats};
pub use planner::{GraphMutationPlanner, GraphOp, MutationPlan, NodeRef};
pub use reader::GraphReader;
pub use reclassify::{filter_banned_entities, TierReclassifier};
pub use resolver::{EntityResolver, ResolvedEntity, RunContext};
pub use store::{EdgeDetail, EdgeEndpoints, Neo4jStore, SupplyChain, SupplyGraphStore};
pub use writer::GraphWriter;

pub use neo4rs::query;
