use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use supplygraph_common::Config;
use supplygraph_etl::{init_tracing, CorpusSink, LocalCorpusSink};
use supplygraph_graph::{build_corpus, Neo4jStore};

/// Extract clusters from the supply graph and save their textual representation.
#[derive(Parser)]
#[command(name = "narrate")]
#[command(version)]
struct Cli {
    /// Name of the output file to save the corpus under
    output_file_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing()?;

    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.log_redacted();

    let store =
        Neo4jStore::connect(&config.neo4j_uri, &config.neo4j_user, &config.neo4j_password).await?;
    let corpus = build_corpus(&store).await.context("generating corpus from graph")?;
    if corpus.is_empty() {
        warn!("Graph produced no sentences; saving an empty corpus");
    }

    let sink = LocalCorpusSink::new(&config.data_dir, &config.corpus_prefix);
    let saved = sink
        .save(&cli.output_file_name, &corpus.to_text())
        .await
        .context("saving corpus")?;

    info!(
        saved = saved.as_str(),
        sentences = corpus.sentences.len(),
        "Corpus generation complete"
    );

    Ok(())
}
