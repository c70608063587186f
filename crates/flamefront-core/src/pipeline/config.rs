use serde::{Deserialize, Serialize};

use crate::color::ColorStrategy;
use crate::consts::DEFAULT_SMOOTHING_WINDOW;
use crate::detection::{HsvRange, HsvThresholds};
use crate::error::{FlameError, Result};
use crate::io::crop::CropBox;

/// Per-frame segmentation settings, captured once per run and never edited in place.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Main region of interest for leading/trailing edge measurement.
    pub primary_crop: CropBox,
    /// Larger region used to find the bounding box and tip near the primary crop's edge.
    pub secondary_crop: CropBox,
    /// Flip frames horizontally before cropping.
    pub mirror: bool,
    pub thresholds: HsvThresholds,
}

/// Pixel-to-physical conversion and frame timing for one run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    /// Pixel distance between two reference markers.
    pub pixels_in_unit: f64,
    /// Physical distance (cm) between the same markers.
    pub cm_apart: f64,
    pub fps: f64,
}

impl Calibration {
    pub fn px_to_cm(&self, pixels: f64) -> f64 {
        pixels / self.pixels_in_unit * self.cm_apart
    }

    pub fn frame_to_seconds(&self, frame: usize) -> f64 {
        frame as f64 / self.fps
    }

    /// Physical width of a crop `crop_width` pixels wide, rounded to 0.1 cm.
    pub fn estimated_plate_width(&self, crop_width: usize) -> f64 {
        (self.px_to_cm(crop_width as f64) * 10.0).round() / 10.0
    }

    pub fn validated(&self) -> Result<Calibration> {
        for (name, value) in [
            ("pixelsInUnit", self.pixels_in_unit),
            ("cmApart", self.cm_apart),
            ("fps", self.fps),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FlameError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(*self)
    }
}

/// Tunables for the post-processing stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostProcessOptions {
    /// Trailing moving-average window over the leading-edge series, in frames.
    pub smoothing_window: usize,
}

impl Default for PostProcessOptions {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

/// Flat settings record as persisted by the editing front end.
///
/// Keys match the settings file: `crop`, `secondCropBox`, `mirror`, `h`, `s`,
/// `v`, `pixelsInUnit`, `cmApart`, `fps`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub crop: CropBox,
    pub second_crop_box: CropBox,
    pub mirror: bool,
    pub h: HsvRange,
    pub s: HsvRange,
    pub v: HsvRange,
    pub pixels_in_unit: f64,
    pub cm_apart: f64,
    pub fps: f64,
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
    #[serde(default)]
    pub color_strategy: ColorStrategy,
}

fn default_smoothing_window() -> usize {
    DEFAULT_SMOOTHING_WINDOW
}

impl Default for SessionConfig {
    fn default() -> Self {
        let thresholds = HsvThresholds::default();
        Self {
            crop: CropBox::new(0, 1080, 0, 1920),
            second_crop_box: CropBox::new(0, 1080, 0, 1920),
            mirror: false,
            h: thresholds.h,
            s: thresholds.s,
            v: thresholds.v,
            pixels_in_unit: 100.0,
            cm_apart: 1.0,
            fps: 30.0,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            color_strategy: ColorStrategy::default(),
        }
    }
}

/// Settings that passed validation, split by the stage that consumes them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidatedSession {
    pub analysis: AnalysisConfig,
    pub calibration: Calibration,
    pub post_process: PostProcessOptions,
    pub color_strategy: ColorStrategy,
}

impl SessionConfig {
    /// The single boundary check for externally supplied settings.
    ///
    /// HSV bounds are clamped into [0, 1]; inverted ranges, non-positive
    /// calibration values and a zero smoothing window are rejected.
    pub fn validate(&self) -> Result<ValidatedSession> {
        let thresholds = HsvThresholds::new(self.h, self.s, self.v).validated()?;
        let calibration = Calibration {
            pixels_in_unit: self.pixels_in_unit,
            cm_apart: self.cm_apart,
            fps: self.fps,
        }
        .validated()?;

        if self.smoothing_window == 0 {
            return Err(FlameError::InvalidConfig(
                "smoothingWindow must be at least 1".into(),
            ));
        }

        Ok(ValidatedSession {
            analysis: AnalysisConfig {
                primary_crop: self.crop,
                secondary_crop: self.second_crop_box,
                mirror: self.mirror,
                thresholds,
            },
            calibration,
            post_process: PostProcessOptions {
                smoothing_window: self.smoothing_window,
            },
            color_strategy: self.color_strategy,
        })
    }
}
