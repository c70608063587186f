use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use flamefront_core::consts::DEFAULT_CONTOUR_LEVEL;
use flamefront_core::io::image_io::{save_mask_png, save_rgb_png};
use flamefront_core::io::{open_source, FrameSource};
use flamefront_core::pipeline::FrameAnalyzer;
use flamefront_core::worker::{PreviewRequest, PreviewWorker};

use crate::summary;

#[derive(Args)]
pub struct PreviewArgs {
    /// Image directory or SER file
    pub source: PathBuf,

    /// Session config file (JSON or TOML)
    #[arg(long)]
    pub config: PathBuf,

    /// Frame index (0-based)
    #[arg(long, default_value = "0")]
    pub frame: usize,

    /// Directory for the mask images and overlay file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also report the contour-traced leading edge used by older results
    #[arg(long)]
    pub legacy_contours: bool,
}

pub fn run(args: &PreviewArgs) -> Result<()> {
    let session = super::load_session(&args.config)?;
    let source: Arc<dyn FrameSource> = Arc::from(
        open_source(&args.source)
            .with_context(|| format!("Failed to open {}", args.source.display()))?,
    );
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| source.default_output_dir());

    let worker = PreviewWorker::spawn(
        Arc::clone(&source),
        FrameAnalyzer::from_strategy(session.color_strategy),
    )?;
    worker.request(PreviewRequest {
        frame_index: args.frame,
        config: session.analysis,
    });
    let Some(result) = worker.finish().pop() else {
        bail!(
            "Frame {} of {} could not be analyzed",
            args.frame,
            source.path().display()
        );
    };

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let m = &result.measurement;
    let mut written = Vec::new();

    // Zero-area crops have nothing to encode.
    if !m.primary_mask.is_empty() {
        let crop_path = output_dir.join(format!("frame{}_crop.png", args.frame));
        save_rgb_png(m.primary_frame.view(), &crop_path)?;
        let mask_path = output_dir.join(format!("frame{}_mask.png", args.frame));
        save_mask_png(&m.primary_mask, &mask_path)?;
        written.extend([crop_path, mask_path]);
    }
    if !m.secondary_mask.is_empty() {
        let bbox_mask_path = output_dir.join(format!("frame{}_bbox_mask.png", args.frame));
        save_mask_png(&m.secondary_mask, &bbox_mask_path)?;
        written.push(bbox_mask_path);
    }

    let overlay_path = output_dir.join(format!("frame{}_annotations.json", args.frame));
    let json = serde_json::to_string_pretty(&result.annotations)?;
    std::fs::write(&overlay_path, json)
        .with_context(|| format!("Failed to write {}", overlay_path.display()))?;
    written.push(overlay_path);

    summary::print_preview_summary(&result, &written);

    if args.legacy_contours {
        let frame = source.read_frame(args.frame)?;
        let legacy = FrameAnalyzer::from_strategy(session.color_strategy).analyze_frame_contours(
            frame.view(),
            &session.analysis.primary_crop,
            session.analysis.mirror,
            &session.analysis.thresholds,
            DEFAULT_CONTOUR_LEVEL,
        )?;
        println!(
            "  Contour leading edge: {} ({} contours)",
            legacy.highest_column,
            legacy.contours.len()
        );
        println!();
    }

    Ok(())
}
