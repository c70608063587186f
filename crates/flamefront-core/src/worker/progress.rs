use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

use crate::pipeline::{AnalysisStage, ProgressReporter};

use super::batch::BatchEvent;

/// Progress reporter that forwards updates over an mpsc channel.
pub struct ChannelProgressReporter {
    tx: mpsc::Sender<BatchEvent>,
    current_total: AtomicUsize,
}

impl ChannelProgressReporter {
    pub fn new(tx: mpsc::Sender<BatchEvent>) -> Self {
        Self {
            tx,
            current_total: AtomicUsize::new(0),
        }
    }
}

impl ProgressReporter for ChannelProgressReporter {
    fn begin_stage(&self, stage: AnalysisStage, total_items: Option<usize>) {
        self.current_total
            .store(total_items.unwrap_or(0), Ordering::Relaxed);
        let _ = self.tx.send(BatchEvent::Stage(stage));
    }

    fn advance(&self, items_done: usize) {
        let _ = self.tx.send(BatchEvent::Progress {
            done: items_done,
            total: self.current_total.load(Ordering::Relaxed),
        });
    }

    fn status(&self, message: &str) {
        let _ = self.tx.send(BatchEvent::Status(message.to_string()));
    }
}
