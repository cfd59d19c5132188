use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use supplygraph_common::SupplyGraphError;

/// Receives the finished corpus for embedding. Returns where it was stored.
#[async_trait]
pub trait CorpusSink: Send + Sync {
    async fn save(&self, name: &str, text: &str) -> Result<String, SupplyGraphError>;
}

/// Writes corpora under `<root>/<prefix>/<name>`.
pub struct LocalCorpusSink {
    root: PathBuf,
    prefix: String,
}

impl LocalCorpusSink {
    pub fn new(root: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.trim_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CorpusSink for LocalCorpusSink {
    async fn save(&self, name: &str, text: &str) -> Result<String, SupplyGraphError> {
        let dir = self.root.join(&self.prefix);
        let path = dir.join(name);
        let storage_err =
            |e: std::io::Error| SupplyGraphError::Storage(format!("{}: {e}", path.display()));

        tokio::fs::create_dir_all(&dir).await.map_err(storage_err)?;
        tokio::fs::write(&path, text).await.map_err(storage_err)?;

        info!(path = %path.display(), bytes = text.len(), "Corpus saved");
        Ok(path.display().to_string())
    }
}
