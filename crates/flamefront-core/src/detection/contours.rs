use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One traced region border. Points are (row, column) pixel coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<(usize, usize)>,
    /// `true` for the inner border of a hole, `false` for an outer border.
    pub is_hole: bool,
}

/// Trace the borders of every region in `mask`.
///
/// The mask is read as an intensity image (true = 1.0, false = 0.0); pixels
/// reaching `level` are foreground. Returns zero or more polylines.
pub fn contours(mask: &Array2<bool>, level: f32) -> Vec<Contour> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    let binary = GrayImage::from_fn(w as u32, h as u32, |col, row| {
        let intensity = if mask[[row as usize, col as usize]] { 1.0 } else { 0.0 };
        if intensity >= level {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });

    find_contours::<i32>(&binary)
        .into_iter()
        .map(|c| Contour {
            points: c
                .points
                .iter()
                .map(|p| (p.y as usize, p.x as usize))
                .collect(),
            is_hole: matches!(c.border_type, BorderType::Hole),
        })
        .collect()
}

/// Largest column over all contour points, or 0 when there are none.
///
/// Points lie on whole pixels of the binarized mask, so a run ending at
/// column `c` reports exactly `c`. Sub-pixel iso-line tracing at the same
/// level would put that edge about 0.2 px further right.
pub fn highest_contour_column(contours: &[Contour]) -> usize {
    contours
        .iter()
        .flat_map(|c| c.points.iter().map(|&(_, col)| col))
        .max()
        .unwrap_or(0)
}
