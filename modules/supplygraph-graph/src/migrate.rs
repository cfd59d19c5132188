use neo4rs::query;
use tracing::{debug, info, warn};

use supplygraph_common::EntityLabel;

use crate::GraphClient;

/// Declare per-label `id` uniqueness. Must run before any node upsert.
pub async fn migrate(client: &GraphClient) -> Result<(), neo4rs::Error> {
    info!("Running schema migrations...");

    for label in EntityLabel::ALL {
        declare_id_constraint(client, label).await?;
    }
    info!("Id uniqueness constraints declared");

    Ok(())
}

/// Delete every node and relationship. Only used for explicit resets.
pub async fn clear_database(client: &GraphClient) -> Result<(), neo4rs::Error> {
    client.run(query("MATCH (n) DETACH DELETE n")).await?;
    warn!("Graph cleared");
    Ok(())
}

async fn declare_id_constraint(
    client: &GraphClient,
    label: EntityLabel,
) -> Result<(), neo4rs::Error> {
    let name = constraint_name(label);
    let cypher =
        format!("CREATE CONSTRAINT {name} IF NOT EXISTS FOR (n:{label}) REQUIRE n.id IS UNIQUE");

    match client.run(query(&cypher)).await {
        Ok(()) => Ok(()),
        // Older servers reject IF NOT EXISTS when an equivalent constraint
        // is already declared under another name.
        Err(e) if constraint_already_declared(&e.to_string()) => {
            debug!(constraint = name.as_str(), %label, "Constraint already declared");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn constraint_name(label: EntityLabel) -> String {
    format!("{}_id_uniqueness", label.as_str().to_lowercase())
}

fn constraint_already_declared(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("already exists") || message.contains("equivalent")
}
