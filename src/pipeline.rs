//! Pipeline orchestration
//!
//! One run walks the stage sequence
//! `Init → ConstraintsReady → WipeDone → Filtered → Staged → Loaded`;
//! any error drops the run into `Failed`. [`Pipeline::run`] wraps the
//! sequence in a bounded retry loop that replays everything from scratch
//! after a fixed sleep. The wipe at the front makes full replay idempotent
//! in replace mode.

use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::{LoadMode, PipelineConfig};
use crate::error::{PipelineError, Result};
use crate::filter::TripFilter;
use crate::graph::{self, GraphClient};
use crate::{source, staging};

/// Stages of one pipeline run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    ConstraintsReady,
    WipeDone,
    Filtered,
    Staged,
    Loaded,
    Failed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Init => "init",
            PipelineStage::ConstraintsReady => "constraints-ready",
            PipelineStage::WipeDone => "wipe-done",
            PipelineStage::Filtered => "filtered",
            PipelineStage::Staged => "staged",
            PipelineStage::Loaded => "loaded",
            PipelineStage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Records read from the source file
    pub records_read: usize,
    /// Records that survived the filter and were loaded
    pub records_kept: usize,
    /// Staged file name handed to the store
    pub staged_file: String,
    /// Attempts taken (1 = first try succeeded)
    pub attempts: u32,
    /// Wall-clock duration of the successful attempt
    #[serde(skip)]
    pub duration: Duration,
}

/// The transform-and-load pipeline for one input file.
pub struct Pipeline {
    config: PipelineConfig,
    input: PathBuf,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, input: PathBuf) -> Self {
        Self { config, input }
    }

    /// Run the full stage sequence once, with no retry.
    pub async fn run_once(&self) -> Result<RunReport> {
        let start = Instant::now();
        let mut stage = PipelineStage::Init;
        tracing::debug!(%stage, input = %self.input.display(), "Pipeline starting");

        let filter = TripFilter::with_thresholds(
            self.config.zone_set()?,
            self.config.filter.min_distance,
            self.config.filter.min_fare,
        );

        let client = GraphClient::connect(&self.config.neo4j).await?;

        graph::ensure_constraints(&client).await?;
        stage = PipelineStage::ConstraintsReady;
        tracing::debug!(%stage, "Stage complete");

        match self.config.load.mode {
            LoadMode::Replace => {
                graph::wipe(&client).await?;
            }
            LoadMode::Append => {
                tracing::info!("Append mode, keeping existing graph data");
            }
        }
        stage = PipelineStage::WipeDone;
        tracing::debug!(%stage, "Stage complete");

        let records = source::read_trips(&self.input)?;
        let records_read = records.len();
        let kept = filter.apply(records);
        stage = PipelineStage::Filtered;
        tracing::info!(
            %stage,
            read = records_read,
            kept = kept.len(),
            zones = %filter.zones(),
            "Filtered trip batch"
        );

        let staged_file = staging::stage(&kept, &self.config.neo4j.import_dir, &self.input)?;
        stage = PipelineStage::Staged;
        tracing::debug!(%stage, file = %staged_file, "Stage complete");

        graph::load_staged(&client, &staged_file).await?;
        stage = PipelineStage::Loaded;
        tracing::info!(%stage, "Pipeline run complete");

        Ok(RunReport {
            records_read,
            records_kept: kept.len(),
            staged_file,
            attempts: 1,
            duration: start.elapsed(),
        })
    }

    /// Run with the configured retry budget. Every retry replays the whole
    /// pipeline from constraint setup. The final error surfaces to the
    /// caller once the budget is exhausted.
    pub async fn run(&self) -> Result<RunReport> {
        let (mut report, attempts) = with_retry(
            self.config.load.max_attempts,
            self.config.retry_delay(),
            || self.run_once(),
        )
        .await?;
        report.attempts = attempts;
        Ok(report)
    }
}

/// Retry `op` up to `max_attempts` times with a fixed sleep in between.
/// Returns the first success together with the attempt count, or
/// [`PipelineError::RetriesExhausted`] wrapping the last error.
pub async fn with_retry<T, F, Fut>(
    max_attempts: u32,
    delay: Duration,
    mut op: F,
) -> Result<(T, u32)>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok((value, attempt)),
            Err(error) if attempt < max_attempts => {
                tracing::warn!(
                    stage = %PipelineStage::Failed,
                    attempt,
                    max_attempts,
                    %error,
                    "Pipeline attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(error) => {
                tracing::error!(attempt, %error, "Pipeline attempts exhausted");
                return Err(PipelineError::RetriesExhausted {
                    attempts: attempt,
                    source: Box::new(error),
                });
            }
        }
    }
}
