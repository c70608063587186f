use serde::Serialize;

use crate::pipeline::analyzer::FrameMeasurement;

/// One display overlay. Coordinates are `[row, col]` in the (mirrored) frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Overlay {
    /// Filled raster; `values` is row-major, 1 = flame, shape `[rows, cols]`.
    Raster {
        name: String,
        origin: [usize; 2],
        shape: [usize; 2],
        values: Vec<u8>,
    },
    /// Closed outline through `vertices`.
    Polygon {
        name: String,
        vertices: Vec<[usize; 2]>,
    },
    Point {
        name: String,
        position: [usize; 2],
    },
    Line {
        name: String,
        start: [usize; 2],
        end: [usize; 2],
    },
}

impl Overlay {
    pub fn name(&self) -> &str {
        match self {
            Self::Raster { name, .. }
            | Self::Polygon { name, .. }
            | Self::Point { name, .. }
            | Self::Line { name, .. } => name,
        }
    }
}

/// Overlays for a preview frame, in drawing order: flame mask, primary crop,
/// secondary crop, flame bounding box, flame tip, leading edge.
///
/// Secondary-crop measurements are shifted by the secondary crop's origin.
/// Bounding box, tip and leading edge are omitted when their mask is empty.
pub fn build_annotations(m: &FrameMeasurement) -> Vec<Overlay> {
    let mut overlays = Vec::with_capacity(6);
    let (p_row, p_col) = m.primary_origin;
    let (s_row, s_col) = m.secondary_origin;
    let (p_h, p_w) = m.primary_mask.dim();
    let (s_h, s_w) = m.secondary_mask.dim();

    overlays.push(Overlay::Raster {
        name: "flame mask".into(),
        origin: [p_row, p_col],
        shape: [p_h, p_w],
        values: m.primary_mask.iter().map(|&on| on as u8).collect(),
    });
    overlays.push(Overlay::Polygon {
        name: "primary crop".into(),
        vertices: rectangle(p_row, p_row + p_h, p_col, p_col + p_w),
    });
    overlays.push(Overlay::Polygon {
        name: "secondary crop".into(),
        vertices: rectangle(s_row, s_row + s_h, s_col, s_col + s_w),
    });

    if m.secondary_mask.iter().any(|&on| on) {
        let b = m.bounding_box.offset(s_row, s_col);
        overlays.push(Overlay::Polygon {
            name: "flame bounding box".into(),
            vertices: rectangle(b.row_min, b.row_max + 1, b.col_min, b.col_max + 1),
        });
        let tip = m.flame_tip.offset(s_row, s_col);
        overlays.push(Overlay::Point {
            name: "flame tip".into(),
            position: [tip.row, tip.col],
        });
    }

    if m.primary_mask.iter().any(|&on| on) {
        let col = p_col + m.highest_column;
        overlays.push(Overlay::Line {
            name: "leading edge".into(),
            start: [p_row, col],
            end: [p_row + p_h.saturating_sub(1), col],
        });
    }

    overlays
}

fn rectangle(row_min: usize, row_max: usize, col_min: usize, col_max: usize) -> Vec<[usize; 2]> {
    vec![
        [row_min, col_min],
        [row_min, col_max],
        [row_max, col_max],
        [row_max, col_min],
    ]
}
