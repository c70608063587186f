use ndarray::{Array2, Array3, ArrayView1, Axis, Zip};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

use super::config::HsvThresholds;

/// Segment an HSV image (h, w, 3) into a boolean mask.
///
/// A pixel is `true` when hue, saturation and value all fall inside their
/// inclusive ranges. An empty image yields an empty mask.
pub fn segment(hsv: &Array3<f32>, thresholds: &HsvThresholds) -> Array2<bool> {
    let (h, w, _) = hsv.dim();
    let mut mask = Array2::from_elem((h, w), false);

    let classify = |dst: &mut bool, px: ArrayView1<f32>| {
        *dst = thresholds.contains(px[0], px[1], px[2]);
    };

    let zip = Zip::from(&mut mask).and(hsv.lanes(Axis(2)));
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(classify);
    } else {
        zip.for_each(classify);
    }

    mask
}

/// Number of `true` pixels in a mask.
pub fn mask_area(mask: &Array2<bool>) -> usize {
    mask.iter().filter(|&&v| v).count()
}
