use tracing::{info, warn};

use crate::io::source::FrameSource;

use super::analyzer::FrameAnalyzer;
use super::config::AnalysisConfig;
use super::series::{FrameSample, TimeSeries};
use super::types::{AnalysisStage, ProgressReporter};

/// Analyze every frame of `source` in order and collect one sample per frame.
///
/// Slot `i` of the returned series always belongs to frame `i`. A frame that
/// cannot be read or analyzed is logged and recorded as [`FrameSample::EMPTY`];
/// the run continues with the next frame.
pub fn analyze_sequence(
    source: &dyn FrameSource,
    config: &AnalysisConfig,
    analyzer: &FrameAnalyzer,
    reporter: &dyn ProgressReporter,
) -> TimeSeries {
    let total = source.len();
    info!(
        total_frames = total,
        source = %source.path().display(),
        mirror = config.mirror,
        "Analyzing frame sequence"
    );

    reporter.begin_stage(AnalysisStage::Analyzing, Some(total));
    let mut series = TimeSeries::with_capacity(total);

    for index in 0..total {
        let sample = match source
            .read_frame(index)
            .and_then(|frame| analyzer.analyze_frame(frame.view(), config))
        {
            Ok(measurement) => measurement.sample(),
            Err(e) => {
                warn!(frame = index, error = %e, "Frame analysis failed, recording empty sample");
                FrameSample::EMPTY
            }
        };

        series.push(sample);
        reporter.status(&format!("analyzing frame {}", series.len()));
        reporter.advance(series.len());
    }

    reporter.finish_stage();
    info!(frames = series.len(), "Sequence analysis complete");
    series
}
