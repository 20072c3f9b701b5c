//! CLI binary entry point for tripgraph

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::{InitArgs, RunArgs, StageArgs, handle_init, handle_run, handle_stage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripgraph::LoadMode;

#[derive(Parser)]
#[command(name = "tripgraph")]
#[command(about = "Load zone-filtered TLC trip batches into a Neo4j trip graph")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full transform-and-load pipeline
    Run {
        /// Input Parquet trip file
        input: PathBuf,
        /// Directory holding tripgraph.toml (default: current directory)
        #[arg(short, long, default_value = ".")]
        config_dir: PathBuf,
        /// Load mode override (replace, append)
        #[arg(short, long, value_parser = parse_load_mode)]
        mode: Option<LoadMode>,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter and stage a trip file without loading it
    Stage {
        /// Input Parquet trip file
        input: PathBuf,
        /// Output directory for the staged CSV
        #[arg(short, long)]
        out: PathBuf,
        /// Directory holding tripgraph.toml (default: current directory)
        #[arg(short, long, default_value = ".")]
        config_dir: PathBuf,
    },

    /// Write a sample configuration file
    Init {
        /// Directory for tripgraph.toml
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_load_mode(s: &str) -> Result<LoadMode, String> {
    s.parse()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input,
            config_dir,
            mode,
            json,
        } => {
            let args = RunArgs {
                input,
                config_dir,
                mode,
                json,
            };
            handle_run(&args).await
        }
        Commands::Stage {
            input,
            out,
            config_dir,
        } => {
            let args = StageArgs {
                input,
                out,
                config_dir,
            };
            handle_stage(&args)
        }
        Commands::Init { dir, force } => {
            let args = InitArgs { dir, force };
            handle_init(&args)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
