use neo4rs::{ConfigBuilder, DetachedRowStream, Graph, Query};

/// Bolt connection pool shared by the writer, the reader and schema setup.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, neo4rs::Error> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .fetch_size(500)
            .max_connections(4)
            .build()?;
        let graph = Graph::connect(config).await?;
        Ok(Self { graph })
    }

    /// Run a write statement, discarding any rows.
    pub async fn run(&self, q: Query) -> Result<(), neo4rs::Error> {
        self.graph.run(q).await
    }

    /// Run a read statement and stream its rows.
    pub async fn execute(&self, q: Query) -> Result<DetachedRowStream, neo4rs::Error> {
        self.graph.execute(q).await
    }
}
