//! CLI-specific error types

use std::path::PathBuf;

use thiserror::Error;
use tripgraph::PipelineError;
use tripgraph::config::ConfigError;
use tripgraph::source::SourceError;
use tripgraph::staging::StageError;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config file already exists: {0} (use --force to overwrite)")]
    ConfigExists(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Staging error: {0}")]
    Staging(#[from] StageError),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(String),
}
