use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use flamefront_core::consts::RAW_SERIES_NAME;
use flamefront_core::io::{open_source, FrameSource};
use flamefront_core::pipeline::FrameAnalyzer;
use flamefront_core::postprocess::{post_process, write_raw_series, PlotRenderer, ProcessPlotRenderer};
use flamefront_core::worker::{spawn_batch, BatchEvent};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::summary;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Image directory or SER file
    pub source: PathBuf,

    /// Session config file (JSON or TOML)
    #[arg(long)]
    pub config: PathBuf,

    /// Title stored in the metadata (defaults to the source name)
    #[arg(long)]
    pub title: Option<String>,

    /// Output directory (defaults to one derived from the source path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip plot rendering
    #[arg(long)]
    pub no_plot: bool,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let session = super::load_session(&args.config)?;
    let source: Arc<dyn FrameSource> = Arc::from(
        open_source(&args.source)
            .with_context(|| format!("Failed to open {}", args.source.display()))?,
    );
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| source.default_output_dir());
    let title = args
        .title
        .clone()
        .unwrap_or_else(|| default_title(source.path()));

    summary::print_session_summary(&session, source.as_ref(), &output_dir);

    let analyzer = FrameAnalyzer::from_strategy(session.color_strategy);
    let pb = ProgressBar::new(source.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let handle = spawn_batch(Arc::clone(&source), session.analysis, analyzer)?;
    let series = handle.wait(|event| match event {
        BatchEvent::Stage(stage) => pb.set_message(stage.to_string()),
        BatchEvent::Status(message) => debug!(status = %message, "Batch status"),
        BatchEvent::Progress { done, total } => {
            pb.set_length(*total as u64);
            pb.set_position(*done as u64);
        }
        BatchEvent::Finished(_) => {}
    })?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let raw_path = output_dir.join(RAW_SERIES_NAME);
    write_raw_series(&series.highest_columns(), &raw_path)
        .with_context(|| format!("Failed to write {}", raw_path.display()))?;

    let renderer = if args.no_plot {
        None
    } else {
        Some(ProcessPlotRenderer::current_exe(vec!["plot".into()])?)
    };
    let result = post_process(
        &series,
        &session.calibration,
        &session.post_process,
        &title,
        &output_dir,
        renderer.as_ref().map(|r| r as &dyn PlotRenderer),
        &super::StageReporter { pb: &pb },
    )
    .with_context(|| format!("Failed to export results to {}", output_dir.display()))?;
    pb.finish_with_message("Done");

    summary::print_result_summary(&result);
    Ok(())
}

fn default_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "flame spread".to_string())
}
