use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use flamefront_core::pipeline::TimeSeries;
use flamefront_core::postprocess::{post_process, read_raw_series, PlotRenderer, ProcessPlotRenderer};
use indicatif::ProgressBar;

use crate::summary;

#[derive(Args)]
pub struct PostprocessArgs {
    /// Raw leading-edge series (one pixel column per line)
    pub raw: PathBuf,

    /// Session config file (JSON or TOML)
    #[arg(long)]
    pub config: PathBuf,

    /// Title stored in the metadata
    #[arg(long, default_value = "flame spread")]
    pub title: String,

    /// Output directory (defaults to the raw file's directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip plot rendering
    #[arg(long)]
    pub no_plot: bool,
}

pub fn run(args: &PostprocessArgs) -> Result<()> {
    let session = super::load_session(&args.config)?;
    let values = read_raw_series(&args.raw)
        .with_context(|| format!("Failed to read {}", args.raw.display()))?;
    let series = TimeSeries::from_highest_columns(&values);

    let output_dir = args.output.clone().unwrap_or_else(|| {
        args.raw
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let renderer = if args.no_plot {
        None
    } else {
        Some(ProcessPlotRenderer::current_exe(vec!["plot".into()])?)
    };
    let pb = ProgressBar::new_spinner();
    let result = post_process(
        &series,
        &session.calibration,
        &session.post_process,
        &args.title,
        &output_dir,
        renderer.as_ref().map(|r| r as &dyn PlotRenderer),
        &super::StageReporter { pb: &pb },
    )
    .with_context(|| format!("Failed to export results to {}", output_dir.display()))?;
    pb.finish_and_clear();

    summary::print_result_summary(&result);
    Ok(())
}
