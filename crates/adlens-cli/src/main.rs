mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adlens")]
#[command(about = "Join ad performance exports with creative analyses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Summarize what a performance export contains
    Overview {
        /// Performance export (.csv or .json)
        #[arg(long)]
        performance: PathBuf,
    },
    /// List the creative records parsed from analysis files
    Creatives {
        /// Analysis documents (.md, .txt) or standalone analyses (.json)
        #[arg(long, required = true, num_args = 1..)]
        analysis: Vec<PathBuf>,
    },
    /// Build the creative summary and write CSV exports
    Summarize {
        #[command(flatten)]
        inputs: PipelineArgs,
        /// Directory for the exports (defaults to ADLENS_OUTPUT_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the KPI digest and creative context block
    Digest {
        #[command(flatten)]
        inputs: PipelineArgs,
    },
}

#[derive(Debug, clap::Args)]
struct PipelineArgs {
    /// Performance export (.csv or .json)
    #[arg(long)]
    performance: PathBuf,
    /// Analysis documents to join onto the summary
    #[arg(long, num_args = 1..)]
    analysis: Vec<PathBuf>,
    /// Ad name to creative mapping (defaults to ADLENS_MAPPING_PATH when present)
    #[arg(long)]
    mapping: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = adlens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Overview { performance } => run::run_overview(&performance),
        Commands::Creatives { analysis } => run::run_creatives(&analysis),
        Commands::Summarize { inputs, out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| config.output_dir.clone());
            run::run_summarize(&config, &inputs, &out_dir)
        }
        Commands::Digest { inputs } => run::run_digest(&config, &inputs),
    }
}
