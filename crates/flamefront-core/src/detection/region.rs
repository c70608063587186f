use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Smallest box containing every `true` pixel of a mask. Bounds are inclusive.
///
/// A mask without any `true` pixel yields [`BoundingBox::EMPTY`] (all zeros).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub row_min: usize,
    pub row_max: usize,
    pub col_min: usize,
    pub col_max: usize,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox {
        row_min: 0,
        row_max: 0,
        col_min: 0,
        col_max: 0,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Shift into the coordinate frame of an enclosing region.
    pub fn offset(&self, row: usize, col: usize) -> BoundingBox {
        BoundingBox {
            row_min: self.row_min + row,
            row_max: self.row_max + row,
            col_min: self.col_min + col,
            col_max: self.col_max + col,
        }
    }
}

/// Right-most flame pixel on the mask's topmost occupied row, as (column, row).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlameTip {
    pub col: usize,
    pub row: usize,
}

impl FlameTip {
    pub const EMPTY: FlameTip = FlameTip { col: 0, row: 0 };

    pub fn offset(&self, row: usize, col: usize) -> FlameTip {
        FlameTip {
            col: self.col + col,
            row: self.row + row,
        }
    }
}

pub fn bounding_box(mask: &Array2<bool>) -> BoundingBox {
    let mut bbox: Option<BoundingBox> = None;

    for ((row, col), &on) in mask.indexed_iter() {
        if !on {
            continue;
        }
        let b = bbox.get_or_insert(BoundingBox {
            row_min: row,
            row_max: row,
            col_min: col,
            col_max: col,
        });
        b.row_min = b.row_min.min(row);
        b.row_max = b.row_max.max(row);
        b.col_min = b.col_min.min(col);
        b.col_max = b.col_max.max(col);
    }

    bbox.unwrap_or(BoundingBox::EMPTY)
}

/// Largest column index holding a `true` pixel (the leading edge), or 0.
pub fn highest_column(mask: &Array2<bool>) -> usize {
    mask.axis_iter(Axis(1))
        .rposition(|column| column.iter().any(|&v| v))
        .unwrap_or(0)
}

/// Smallest column index holding a `true` pixel (the trailing edge), or 0.
pub fn lowest_column(mask: &Array2<bool>) -> usize {
    mask.axis_iter(Axis(1))
        .position(|column| column.iter().any(|&v| v))
        .unwrap_or(0)
}

/// Index of the first row holding a `true` pixel.
pub fn topmost_row(mask: &Array2<bool>) -> Option<usize> {
    mask.axis_iter(Axis(0))
        .position(|row| row.iter().any(|&v| v))
}

/// Right-most `true` pixel on `boundary_row`, or [`FlameTip::EMPTY`] when the
/// row is outside the mask or holds no `true` pixel.
pub fn flame_tip(mask: &Array2<bool>, boundary_row: usize) -> FlameTip {
    if boundary_row >= mask.nrows() {
        return FlameTip::EMPTY;
    }
    mask.row(boundary_row)
        .iter()
        .rposition(|&v| v)
        .map(|col| FlameTip {
            col,
            row: boundary_row,
        })
        .unwrap_or(FlameTip::EMPTY)
}
