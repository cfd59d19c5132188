use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use supplygraph_common::{Article, SupplyGraphError};

/// Where the extracted relationship document comes from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Load and parse the article array at `location`.
    async fn load(&self, location: &str) -> Result<Vec<Article>, SupplyGraphError>;
}

/// Reads documents from a directory standing in for the object-storage bucket.
pub struct LocalDocumentSource {
    root: PathBuf,
}

impl LocalDocumentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl DocumentSource for LocalDocumentSource {
    async fn load(&self, location: &str) -> Result<Vec<Article>, SupplyGraphError> {
        let path = self.resolve(location);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SupplyGraphError::Storage(format!("{}: {e}", path.display())))?;

        let articles: Vec<Article> = serde_json::from_str(&raw)
            .map_err(|e| SupplyGraphError::Input(format!("{}: {e}", path.display())))?;

        info!(path = %path.display(), articles = articles.len(), "Loaded relationship document");
        Ok(articles)
    }
}
