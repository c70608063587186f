use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::debug;

use crate::error::{FlameError, Result};
use crate::io::source::FrameSource;
use crate::pipeline::{
    analyze_sequence, AnalysisConfig, AnalysisStage, FrameAnalyzer, ProgressReporter, TimeSeries,
};

use super::progress::ChannelProgressReporter;

/// Notifications sent by a batch worker, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchEvent {
    Stage(AnalysisStage),
    Status(String),
    Progress { done: usize, total: usize },
    /// Last event of a run.
    Finished(TimeSeries),
}

/// Handle to a running batch analysis.
pub struct BatchHandle {
    events: mpsc::Receiver<BatchEvent>,
    handle: Option<JoinHandle<()>>,
}

/// Analyze every frame of `source` on a dedicated worker thread.
///
/// `config` is captured by value at spawn time and cannot change during the run.
pub fn spawn_batch(
    source: Arc<dyn FrameSource>,
    config: AnalysisConfig,
    analyzer: FrameAnalyzer,
) -> Result<BatchHandle> {
    let (tx, rx) = mpsc::channel::<BatchEvent>();

    let handle = std::thread::Builder::new()
        .name("flamefront-batch".into())
        .spawn(move || {
            let reporter = ChannelProgressReporter::new(tx.clone());
            reporter.begin_stage(AnalysisStage::Reading, Some(source.len()));
            reporter.status("reading image sequence");
            reporter.finish_stage();
            let series = analyze_sequence(source.as_ref(), &config, &analyzer, &reporter);
            debug!(frames = series.len(), "Batch worker finished");
            let _ = tx.send(BatchEvent::Finished(series));
        })?;

    Ok(BatchHandle {
        events: rx,
        handle: Some(handle),
    })
}

impl BatchHandle {
    pub fn events(&self) -> &mpsc::Receiver<BatchEvent> {
        &self.events
    }

    /// Block until the run ends, passing every intermediate event to `on_event`.
    pub fn wait(mut self, mut on_event: impl FnMut(&BatchEvent)) -> Result<TimeSeries> {
        let mut finished = None;
        for event in self.events.iter() {
            match event {
                BatchEvent::Finished(series) => {
                    finished = Some(series);
                    break;
                }
                other => on_event(&other),
            }
        }

        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| FlameError::Worker("batch worker panicked".into()))?;
        }

        finished.ok_or_else(|| FlameError::Worker("batch worker stopped before finishing".into()))
    }
}
