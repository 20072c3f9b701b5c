//! CLI command handlers

use std::path::PathBuf;

use tripgraph::config::{self, LoadMode, PipelineConfig};
use tripgraph::{Pipeline, TripFilter, source, staging};

use crate::error::CliError;

/// Arguments for the `run` command
pub struct RunArgs {
    /// Input Parquet trip file
    pub input: PathBuf,
    /// Directory holding tripgraph.toml
    pub config_dir: PathBuf,
    /// Load mode override
    pub mode: Option<LoadMode>,
    /// Print the run report as JSON
    pub json: bool,
}

/// Arguments for the `stage` command
pub struct StageArgs {
    /// Input Parquet trip file
    pub input: PathBuf,
    /// Output directory for the staged CSV
    pub out: PathBuf,
    /// Directory holding tripgraph.toml
    pub config_dir: PathBuf,
}

/// Arguments for the `init` command
pub struct InitArgs {
    /// Directory for tripgraph.toml
    pub dir: PathBuf,
    /// Overwrite an existing config
    pub force: bool,
}

/// Handle the `run` command: the full transform-and-load pipeline.
pub async fn handle_run(args: &RunArgs) -> Result<(), CliError> {
    let mut config = PipelineConfig::load(&args.config_dir)?;
    if let Some(mode) = args.mode {
        config.load.mode = mode;
    }

    let pipeline = Pipeline::new(config, args.input.clone());
    let report = pipeline.run().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Loaded {} of {} trips from {} (staged as {}, {} attempt(s), {:.1}s)",
            report.records_kept,
            report.records_read,
            args.input.display(),
            report.staged_file,
            report.attempts,
            report.duration.as_secs_f64(),
        );
    }

    Ok(())
}

/// Handle the `stage` command: read, filter and stage without touching the
/// store. Useful as a dry run of the transform half.
pub fn handle_stage(args: &StageArgs) -> Result<(), CliError> {
    let config = PipelineConfig::load(&args.config_dir)?;
    let filter = TripFilter::with_thresholds(
        config.zone_set()?,
        config.filter.min_distance,
        config.filter.min_fare,
    );

    let records = source::read_trips(&args.input)?;
    let total = records.len();
    let kept = filter.apply(records);
    let file_name = staging::stage(&kept, &args.out, &args.input)?;

    println!(
        "Staged {} of {} trips at {}",
        kept.len(),
        total,
        args.out.join(file_name).display()
    );

    Ok(())
}

/// Handle the `init` command: write a commented sample configuration.
pub fn handle_init(args: &InitArgs) -> Result<(), CliError> {
    let config_path = args.dir.join(config::CONFIG_FILENAME);
    if config_path.exists() && !args.force {
        return Err(CliError::ConfigExists(config_path));
    }

    std::fs::create_dir_all(&args.dir).map_err(|e| CliError::Io(e.to_string()))?;
    std::fs::write(&config_path, config::sample_config())
        .map_err(|e| CliError::Io(e.to_string()))?;

    println!("Wrote {}", config_path.display());
    Ok(())
}
