use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use crate::annotations::{build_annotations, Overlay};
use crate::error::Result;
use crate::io::source::FrameSource;
use crate::pipeline::{AnalysisConfig, FrameAnalyzer, FrameMeasurement};

/// Analyze one frame with a snapshot of the current settings.
#[derive(Clone, Debug)]
pub struct PreviewRequest {
    pub frame_index: usize,
    pub config: AnalysisConfig,
}

#[derive(Clone, Debug)]
pub struct PreviewResult {
    pub frame_index: usize,
    pub measurement: FrameMeasurement,
    pub annotations: Vec<Overlay>,
}

/// Single-frame analysis on a background thread, one request at a time.
///
/// Requests queue behind the one being processed. A request whose frame cannot
/// be read produces no result, so callers keep showing their previous overlays.
pub struct PreviewWorker {
    requests: Option<mpsc::Sender<PreviewRequest>>,
    results: mpsc::Receiver<PreviewResult>,
    handle: Option<JoinHandle<()>>,
}

impl PreviewWorker {
    pub fn spawn(source: Arc<dyn FrameSource>, analyzer: FrameAnalyzer) -> Result<Self> {
        let (req_tx, req_rx) = mpsc::channel::<PreviewRequest>();
        let (res_tx, res_rx) = mpsc::channel::<PreviewResult>();

        let handle = std::thread::Builder::new()
            .name("flamefront-preview".into())
            .spawn(move || preview_loop(req_rx, res_tx, source, analyzer))?;

        Ok(Self {
            requests: Some(req_tx),
            results: res_rx,
            handle: Some(handle),
        })
    }

    /// Queue a request. Returns `false` if the worker has stopped.
    pub fn request(&self, request: PreviewRequest) -> bool {
        self.requests
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok())
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<PreviewResult> {
        self.results.recv_timeout(timeout).ok()
    }

    /// Most recent finished result, discarding older ones.
    pub fn try_latest(&self) -> Option<PreviewResult> {
        self.results.try_iter().last()
    }

    /// Stop accepting requests, let the queue drain, and return every result
    /// not yet received.
    pub fn finish(mut self) -> Vec<PreviewResult> {
        self.stop();
        self.results.try_iter().collect()
    }

    fn stop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Preview worker panicked");
            }
        }
    }
}

impl Drop for PreviewWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn preview_loop(
    req_rx: mpsc::Receiver<PreviewRequest>,
    res_tx: mpsc::Sender<PreviewResult>,
    source: Arc<dyn FrameSource>,
    analyzer: FrameAnalyzer,
) {
    while let Ok(request) = req_rx.recv() {
        let frame = match source.read_frame(request.frame_index) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(frame = request.frame_index, error = %e, "Skipping preview request");
                continue;
            }
        };

        let measurement = match analyzer.analyze_frame(frame.view(), &request.config) {
            Ok(m) => m,
            Err(e) => {
                warn!(frame = request.frame_index, error = %e, "Skipping preview request");
                continue;
            }
        };

        debug!(
            frame = request.frame_index,
            highest = measurement.highest_column,
            "Preview frame analyzed"
        );
        let annotations = build_annotations(&measurement);
        let result = PreviewResult {
            frame_index: request.frame_index,
            measurement,
            annotations,
        };
        if res_tx.send(result).is_err() {
            break;
        }
    }
}
