mod commands;
mod summary;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ndmorph", about = "N-dimensional distance transforms, morphology and resampling")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of worker threads (defaults to one per core)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show shape, strides, spacing and value summary of an array file
    Info(commands::info::InfoArgs),
    /// Euclidean distance to the nearest foreground cell
    Distance(commands::distance::DistanceArgs),
    /// Apply a kernel-based morphological operation
    Morph(commands::morph::MorphArgs),
    /// Label connected foreground regions
    Components(commands::components::ComponentsArgs),
    /// Interpolate an array on a grid or at points
    Resample(commands::resample::ResampleArgs),
    /// List the neighbourhood offsets of an array
    Neighbourhood(commands::neighbourhood::NeighbourhoodArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
        info!(threads, "Configured worker pool");
    }

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Distance(args) => commands::distance::run(args),
        Commands::Morph(args) => commands::morph::run(args),
        Commands::Components(args) => commands::components::run(args),
        Commands::Resample(args) => commands::resample::run(args),
        Commands::Neighbourhood(args) => commands::neighbourhood::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
