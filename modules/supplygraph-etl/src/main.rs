use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use supplygraph_common::Config;
use supplygraph_etl::{init_tracing, DocumentSource, LocalDocumentSource};
use supplygraph_graph::{ingest, MemoryStore, Neo4jStore, SupplyGraphStore};

/// Load extracted supplier/buyer relationships and write them into the supply graph.
#[derive(Parser)]
#[command(name = "supplygraph-etl")]
#[command(version)]
struct Cli {
    /// Location of the relationship document, relative to SUPPLYGRAPH_DATA_DIR
    input: String,

    /// Plan and apply against an in-memory graph instead of Neo4j
    #[arg(long)]
    dry_run: bool,

    /// Delete every node and edge before loading (WARNING: destroys the graph)
    #[arg(long, conflicts_with = "dry_run")]
    reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing()?;

    let cli = Cli::parse();
    info!(input = cli.input.as_str(), "Supply graph transform starting...");

    let config = if cli.dry_run {
        Config::offline_from_env()
    } else {
        Config::from_env()?
    };
    config.log_redacted();

    let source = LocalDocumentSource::new(&config.data_dir);
    let articles = source
        .load(&cli.input)
        .await
        .with_context(|| format!("loading {}", cli.input))?;

    let store: Box<dyn SupplyGraphStore> = if cli.dry_run {
        Box::new(MemoryStore::new())
    } else {
        Box::new(
            Neo4jStore::connect(&config.neo4j_uri, &config.neo4j_user, &config.neo4j_password)
                .await?,
        )
    };

    if cli.reset {
        store.clear().await.context("clearing graph")?;
    }

    let stats = ingest(store.as_ref(), articles)
        .await
        .context("writing relationships to the graph")?;
    info!("All data successfully imported. {stats}");

    Ok(())
}
