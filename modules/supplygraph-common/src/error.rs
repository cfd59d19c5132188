use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupplyGraphError {
    #[error("Graph store error: {0}")]
    Graph(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
