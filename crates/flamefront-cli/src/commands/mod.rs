pub mod analyze;
pub mod config;
pub mod info;
pub mod plot;
pub mod postprocess;
pub mod preview;

use std::path::Path;

use anyhow::{Context, Result};
use flamefront_core::pipeline::{AnalysisStage, ProgressReporter, SessionConfig, ValidatedSession};
use indicatif::ProgressBar;
use tracing::debug;

/// Load and validate a session config. `.toml` files are read as TOML,
/// everything else as JSON.
pub fn load_session(path: &Path) -> Result<ValidatedSession> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
    let session: SessionConfig = if is_toml {
        toml::from_str(&contents).context("Invalid TOML session config")?
    } else {
        serde_json::from_str(&contents).context("Invalid JSON session config")?
    };

    Ok(session.validate()?)
}

/// Shows the current export stage as the progress bar message.
pub struct StageReporter<'a> {
    pub pb: &'a ProgressBar,
}

impl ProgressReporter for StageReporter<'_> {
    fn begin_stage(&self, stage: AnalysisStage, _total_items: Option<usize>) {
        self.pb.set_message(stage.to_string());
    }

    fn status(&self, message: &str) {
        debug!(status = %message, "Export status");
    }
}
