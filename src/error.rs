//! Top-level error type for the pipeline

use crate::config::ConfigError;
use crate::graph::GraphError;
use crate::source::SourceError;
use crate::staging::StageError;

/// Alias for Results returning [`PipelineError`].
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Top-level error type; every component failure surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Staging error: {0}")]
    Staging(#[from] StageError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("All {attempts} attempts failed; last error: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<PipelineError>,
    },
}
