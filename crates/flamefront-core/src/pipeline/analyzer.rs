use ndarray::{Array2, Array3, ArrayView3};
use tracing::trace;

use crate::color::{ColorMapper, ColorStrategy};
use crate::consts::COLOR_CHANNEL_COUNT;
use crate::detection::{
    bounding_box, contours, flame_tip, highest_column, highest_contour_column, lowest_column,
    segment, BoundingBox, Contour, FlameTip, HsvThresholds,
};
use crate::error::{FlameError, Result};
use crate::io::crop::{mirror_horizontal, CropBox};

use super::config::AnalysisConfig;
use super::series::FrameSample;

/// Everything measured on one frame, plus the crops it was measured on.
///
/// Secondary-crop coordinates (`bounding_box`, `flame_tip`) are relative to
/// `secondary_origin`; add it to get (mirrored) frame coordinates.
#[derive(Clone, Debug)]
pub struct FrameMeasurement {
    pub primary_frame: Array3<u8>,
    pub primary_mask: Array2<bool>,
    /// (row, col) of the clipped primary crop in the (mirrored) frame.
    pub primary_origin: (usize, usize),
    pub secondary_frame: Array3<u8>,
    pub secondary_mask: Array2<bool>,
    /// (row, col) of the clipped secondary crop in the (mirrored) frame.
    pub secondary_origin: (usize, usize),
    pub highest_column: usize,
    pub lowest_column: usize,
    pub bounding_box: BoundingBox,
    pub flame_tip: FlameTip,
}

impl FrameMeasurement {
    pub fn sample(&self) -> FrameSample {
        FrameSample {
            highest_column: self.highest_column,
            lowest_column: self.lowest_column,
            bounding_box: self.bounding_box,
            flame_tip: self.flame_tip,
        }
    }
}

/// Result of the contour-based measurement path.
#[derive(Clone, Debug)]
pub struct ContourMeasurement {
    pub frame: Array3<u8>,
    pub mask: Array2<bool>,
    pub contours: Vec<Contour>,
    /// Largest column over all contour points, 0 when none were traced.
    pub highest_column: usize,
}

/// Runs segmentation and region extraction on single frames.
///
/// Holds no per-frame state; one instance can be shared across threads.
#[derive(Clone, Copy, Debug)]
pub struct FrameAnalyzer {
    mapper: ColorMapper,
}

impl FrameAnalyzer {
    pub fn new(mapper: ColorMapper) -> Self {
        Self { mapper }
    }

    pub fn from_strategy(strategy: ColorStrategy) -> Self {
        Self::new(ColorMapper::from_strategy(strategy))
    }

    /// HSV-threshold an RGB region into a flame mask.
    pub fn mask_region(&self, region: ArrayView3<'_, u8>, thresholds: &HsvThresholds) -> Array2<bool> {
        segment(&self.mapper.to_hsv(region), thresholds)
    }

    /// Measure one raw frame.
    ///
    /// Order: mirror the whole frame, then measure the secondary crop
    /// (bounding box, tip), then the primary crop (leading/trailing edge).
    /// Out-of-range crops are clipped; empty masks give sentinel values.
    pub fn analyze_frame(
        &self,
        raw: ArrayView3<'_, u8>,
        config: &AnalysisConfig,
    ) -> Result<FrameMeasurement> {
        check_channels(&raw)?;
        let oriented = if config.mirror {
            mirror_horizontal(raw)
        } else {
            raw
        };
        let (h, w, _) = oriented.dim();

        let secondary_box = config.secondary_crop.clipped(h, w);
        let secondary = secondary_box.extract(oriented);
        let secondary_mask = self.mask_region(secondary, &config.thresholds);
        let bbox = bounding_box(&secondary_mask);
        let tip = flame_tip(&secondary_mask, bbox.row_min);

        let primary_box = config.primary_crop.clipped(h, w);
        let primary = primary_box.extract(oriented);
        let primary_mask = self.mask_region(primary, &config.thresholds);
        let highest = highest_column(&primary_mask);
        let lowest = lowest_column(&primary_mask);

        trace!(highest, lowest, ?bbox, ?tip, "Frame measured");

        Ok(FrameMeasurement {
            primary_frame: primary.to_owned(),
            primary_mask,
            primary_origin: (primary_box.row_min, primary_box.col_min),
            secondary_frame: secondary.to_owned(),
            secondary_mask,
            secondary_origin: (secondary_box.row_min, secondary_box.col_min),
            highest_column: highest,
            lowest_column: lowest,
            bounding_box: bbox,
            flame_tip: tip,
        })
    }

    /// Contour-based leading edge on a single crop, kept for comparison with
    /// older results. Uses the same mirror-before-crop rule as [`Self::analyze_frame`].
    pub fn analyze_frame_contours(
        &self,
        raw: ArrayView3<'_, u8>,
        crop: &CropBox,
        mirror: bool,
        thresholds: &HsvThresholds,
        level: f32,
    ) -> Result<ContourMeasurement> {
        check_channels(&raw)?;
        let oriented = if mirror { mirror_horizontal(raw) } else { raw };
        let region = crop.extract(oriented);
        let mask = self.mask_region(region, thresholds);
        let traced = contours(&mask, level);
        let highest = highest_contour_column(&traced);

        Ok(ContourMeasurement {
            frame: region.to_owned(),
            mask,
            contours: traced,
            highest_column: highest,
        })
    }
}

fn check_channels(raw: &ArrayView3<'_, u8>) -> Result<()> {
    let channels = raw.dim().2;
    if channels != COLOR_CHANNEL_COUNT {
        return Err(FlameError::UnsupportedColorMode(format!(
            "expected {COLOR_CHANNEL_COUNT} color channels, got {channels}"
        )));
    }
    Ok(())
}
