use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use flamefront_core::postprocess::render_plots;

#[derive(Args)]
pub struct PlotArgs {
    /// Results table written by `analyze` or `postprocess`
    #[arg(long)]
    pub csv: PathBuf,

    /// Output PNG path
    #[arg(long)]
    pub output: PathBuf,
}

pub fn run(args: &PlotArgs) -> Result<()> {
    render_plots(&args.csv, &args.output)
        .with_context(|| format!("Failed to plot {}", args.csv.display()))
}
