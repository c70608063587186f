pub mod analyzer;
pub mod batch;
pub mod config;
pub mod series;
mod types;

pub use analyzer::{ContourMeasurement, FrameAnalyzer, FrameMeasurement};
pub use batch::analyze_sequence;
pub use config::{AnalysisConfig, Calibration, PostProcessOptions, SessionConfig, ValidatedSession};
pub use series::{FrameSample, TimeSeries};
pub use types::{AnalysisStage, NoOpReporter, ProgressReporter};
