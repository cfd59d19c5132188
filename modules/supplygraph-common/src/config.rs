use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::SupplyGraphError;

const DEFAULT_CORPUS_PREFIX: &str = "vector_database_resources/textual_representations";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Neo4j
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,

    // Document storage
    pub data_dir: PathBuf,
    pub corpus_prefix: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Fails with a clear message if the Neo4j connection vars are missing.
    pub fn from_env() -> Result<Self, SupplyGraphError> {
        Ok(Self {
            neo4j_uri: required_env("NEO4J_URI")?,
            neo4j_user: required_env("NEO4J_USER")?,
            neo4j_password: required_env("NEO4J_PASSWORD")?,
            ..Self::offline_from_env()
        })
    }

    /// Load a config for runs that never touch the graph store (dry runs).
    pub fn offline_from_env() -> Self {
        Self {
            neo4j_uri: String::new(),
            neo4j_user: String::new(),
            neo4j_password: String::new(),
            data_dir: env::var("SUPPLYGRAPH_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            corpus_prefix: env::var("SUPPLYGRAPH_CORPUS_PREFIX")
                .unwrap_or_else(|_| DEFAULT_CORPUS_PREFIX.to_string()),
        }
    }

    /// Log the effective configuration with secrets masked.
    pub fn log_redacted(&self) {
        info!(
            neo4j_uri = self.neo4j_uri.as_str(),
            neo4j_user = self.neo4j_user.as_str(),
            neo4j_password = redact(&self.neo4j_password),
            data_dir = %self.data_dir.display(),
            corpus_prefix = self.corpus_prefix.as_str(),
            "Loaded configuration"
        );
    }
}

fn required_env(key: &str) -> Result<String, SupplyGraphError> {
    env::var(key)
        .map_err(|_| SupplyGraphError::Config(format!("{key} environment variable is required")))
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "********"
    }
}
