pub mod autocrop;
pub mod export;
pub mod plot;
pub mod smoothing;
pub mod stats;
pub mod table;

use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::consts::{METADATA_NAME, RESULTS_CSV_NAME, RESULTS_PLOT_NAME, TOOL_VERSION};
use crate::error::Result;
use crate::pipeline::config::{Calibration, PostProcessOptions};
use crate::pipeline::series::TimeSeries;
use crate::pipeline::{AnalysisStage, ProgressReporter};

pub use autocrop::auto_crop_range;
pub use export::{read_raw_series, write_raw_series, AnalysisMetadata};
pub use plot::{render_plots, PlotRenderer, PlotRequest, ProcessPlotRenderer};
pub use smoothing::{derivative, rolling_mean};
pub use stats::{summarize, SpeedStatistics};
pub use table::{ResultsRow, ResultsTable};

/// What happened to the plotting stage of an export.
#[derive(Clone, Debug, PartialEq)]
pub enum PlotOutcome {
    Rendered(PathBuf),
    Skipped,
    Failed(String),
}

/// Everything produced by one post-processing run.
#[derive(Clone, Debug)]
pub struct AnalysisResult {
    pub table: ResultsTable,
    pub statistics: SpeedStatistics,
    pub metadata: AnalysisMetadata,
    /// Source frame indices kept by auto-crop.
    pub retained: Range<usize>,
    pub csv_path: PathBuf,
    pub metadata_path: PathBuf,
    pub plot: PlotOutcome,
}

/// Trim, calibrate, smooth and differentiate a series into a results table.
///
/// Pure: touches no files. Rows cover the auto-crop range of the leading-edge
/// series; all companion columns are sliced with the same range.
pub fn build_table(
    series: &TimeSeries,
    calibration: &Calibration,
    options: &PostProcessOptions,
) -> (ResultsTable, Range<usize>) {
    let retained = auto_crop_range(&series.highest_columns());
    let samples = &series.samples()[retained.clone()];

    let frames: Vec<usize> = (1..=samples.len()).collect();
    let seconds: Vec<f64> = frames
        .iter()
        .map(|&f| calibration.frame_to_seconds(f))
        .collect();
    let raw: Vec<f64> = samples.iter().map(|s| s.highest_column as f64).collect();
    let smooth = rolling_mean(&raw, options.smoothing_window);
    let smooth_cm: Vec<Option<f64>> = smooth
        .iter()
        .map(|v| v.map(|px| calibration.px_to_cm(px)))
        .collect();
    let speed = derivative(&smooth_cm, &seconds);

    let rows = samples
        .iter()
        .enumerate()
        .map(|(i, s)| ResultsRow {
            frame: frames[i],
            source_frame: retained.start + i,
            highest_x_pos: s.highest_column,
            lowest_x_pos: s.lowest_column,
            bbox_row_min: s.bounding_box.row_min,
            bbox_row_max: s.bounding_box.row_max,
            bbox_col_min: s.bounding_box.col_min,
            bbox_col_max: s.bounding_box.col_max,
            tip_col: s.flame_tip.col,
            tip_row: s.flame_tip.row,
            seconds: seconds[i],
            highest_x_pos_smooth: smooth[i],
            highest_x_pos_smooth_cm: smooth_cm[i],
            highest_x_pos_smooth_cm_speed: speed[i],
        })
        .collect();

    (ResultsTable { rows }, retained)
}

/// Post-process a completed series and export it to `output_dir`.
///
/// Writes `highestXPos.csv` and `metadata.json` first, then hands the table to
/// `plotter` (if any) to produce `highestXPos.png`. File-system errors before
/// plotting are returned; a plotting failure is reported in
/// [`AnalysisResult::plot`] and leaves the table and metadata in place.
///
/// `reporter` sees an `Exporting` stage, then a `Plotting` stage when a
/// `plotter` is given.
pub fn post_process(
    series: &TimeSeries,
    calibration: &Calibration,
    options: &PostProcessOptions,
    title: &str,
    output_dir: &Path,
    plotter: Option<&dyn PlotRenderer>,
    reporter: &dyn ProgressReporter,
) -> Result<AnalysisResult> {
    let (table, retained) = build_table(series, calibration, options);
    let statistics = summarize(&table.speeds());
    info!(
        frames = series.len(),
        retained_start = retained.start,
        retained_end = retained.end,
        window = options.smoothing_window,
        "Post-processing leading-edge series"
    );
    if table.is_empty() {
        warn!("Auto-crop kept no frames; exporting an empty table");
    }

    reporter.begin_stage(AnalysisStage::Exporting, None);
    reporter.status("exporting results");
    std::fs::create_dir_all(output_dir)?;
    let csv_path = output_dir.join(RESULTS_CSV_NAME);
    let metadata_path = output_dir.join(METADATA_NAME);

    table.write_csv(&csv_path)?;

    let metadata = AnalysisMetadata {
        title: title.to_string(),
        export_path: output_dir.to_path_buf(),
        tool_version: TOOL_VERSION.to_string(),
        calibration: *calibration,
        smoothing_window: options.smoothing_window,
        analyzed_frames: series.len(),
        retained_frames: retained.clone(),
        statistics,
    };
    export::write_metadata(&metadata, &metadata_path)?;
    reporter.finish_stage();

    let plot = match plotter {
        None => PlotOutcome::Skipped,
        Some(renderer) => {
            reporter.begin_stage(AnalysisStage::Plotting, None);
            reporter.status("rendering plots");
            let request = PlotRequest {
                csv: csv_path.clone(),
                output: output_dir.join(RESULTS_PLOT_NAME),
            };
            let outcome = match renderer.render(&request) {
                Ok(()) => PlotOutcome::Rendered(request.output),
                Err(e) => {
                    warn!(error = %e, "Plot rendering failed; table and metadata were kept");
                    PlotOutcome::Failed(e.to_string())
                }
            };
            reporter.finish_stage();
            outcome
        }
    };

    Ok(AnalysisResult {
        table,
        statistics,
        metadata,
        retained,
        csv_path,
        metadata_path,
        plot,
    })
}
