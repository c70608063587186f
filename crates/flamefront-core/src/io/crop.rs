use ndarray::{s, ArrayView3};
use serde::{Deserialize, Serialize};

/// A rectangle in frame coordinates, `[row_min, row_max)` x `[col_min, col_max)`.
///
/// Serialized as `[row_min, row_max, col_min, col_max]`. Boxes that are
/// inverted or reach past the frame are clipped on extraction, never rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 4]", into = "[usize; 4]")]
pub struct CropBox {
    pub row_min: usize,
    pub row_max: usize,
    pub col_min: usize,
    pub col_max: usize,
}

impl CropBox {
    pub fn new(row_min: usize, row_max: usize, col_min: usize, col_max: usize) -> Self {
        Self {
            row_min,
            row_max,
            col_min,
            col_max,
        }
    }

    /// Box covering an entire `height` x `width` frame.
    pub fn full(height: usize, width: usize) -> Self {
        Self::new(0, height, 0, width)
    }

    pub fn height(&self) -> usize {
        self.row_max.saturating_sub(self.row_min)
    }

    pub fn width(&self) -> usize {
        self.col_max.saturating_sub(self.col_min)
    }

    /// Clip to a `height` x `width` frame. The result may be empty but always
    /// satisfies `min <= max <= extent` on both axes.
    pub fn clipped(&self, height: usize, width: usize) -> CropBox {
        let row_min = self.row_min.min(height);
        let col_min = self.col_min.min(width);
        CropBox {
            row_min,
            row_max: self.row_max.clamp(row_min, height),
            col_min,
            col_max: self.col_max.clamp(col_min, width),
        }
    }

    /// Borrow the clipped sub-region of an (h, w, channels) frame.
    pub fn extract<'a>(&self, frame: ArrayView3<'a, u8>) -> ArrayView3<'a, u8> {
        let (h, w, _) = frame.dim();
        let c = self.clipped(h, w);
        frame.slice_move(s![c.row_min..c.row_max, c.col_min..c.col_max, ..])
    }
}

impl From<[usize; 4]> for CropBox {
    fn from(v: [usize; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<CropBox> for [usize; 4] {
    fn from(c: CropBox) -> Self {
        [c.row_min, c.row_max, c.col_min, c.col_max]
    }
}

/// Reverse the column axis of a frame without copying.
pub fn mirror_horizontal(frame: ArrayView3<'_, u8>) -> ArrayView3<'_, u8> {
    frame.slice_move(s![.., ..;-1, ..])
}
