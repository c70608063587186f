mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flamefront", about = "Flame leading-edge tracking for flame-spread recordings")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show frame source metadata
    Info(commands::info::InfoArgs),
    /// Print or save a default session config
    Config(commands::config::ConfigArgs),
    /// Analyze one frame and write its masks and overlays
    Preview(commands::preview::PreviewArgs),
    /// Analyze every frame and export the results
    Analyze(commands::analyze::AnalyzeArgs),
    /// Re-run post-processing from a raw leading-edge series
    Postprocess(commands::postprocess::PostprocessArgs),
    /// Render result plots from an exported table
    #[command(hide = true)]
    Plot(commands::plot::PlotArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Postprocess(args) => commands::postprocess::run(args),
        Commands::Plot(args) => commands::plot::run(args),
    }
}
