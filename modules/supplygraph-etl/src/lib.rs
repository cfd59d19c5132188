pub mod sink;
pub mod source;

pub use sink::{CorpusSink, LocalCorpusSink};
pub use source::{DocumentSource, LocalDocumentSource};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber shared by both binaries.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("supplygraph=info".parse()?))
        .init();
    Ok(())
}
