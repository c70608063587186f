use ndarray::{Array3, ArrayView1, ArrayView3, ArrayViewMut1, Axis, Zip};
use serde::{Deserialize, Serialize};

use crate::consts::{COLOR_CHANNEL_COUNT, PARALLEL_PIXEL_THRESHOLD};

use super::lookup::HsvLookup;

/// Convert one 8-bit RGB pixel to HSV, every channel scaled to [0, 1].
///
/// Hue is computed in degrees from the max/min channel formula and divided by
/// 360. Black maps to (0, 0, 0) and greys have zero hue.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [f32; 3] {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let value = max as f32 / 255.0;

    if max == 0 {
        return [0.0, 0.0, value];
    }

    let delta = (max - min) as f32;
    let saturation = delta / max as f32;
    if max == min {
        return [0.0, saturation, value];
    }

    let sector = if max == r {
        (g - b) as f32 / delta
    } else if max == g {
        2.0 + (b - r) as f32 / delta
    } else {
        4.0 + (r - g) as f32 / delta
    };

    let mut degrees = sector * 60.0;
    if degrees < 0.0 {
        degrees += 360.0;
    }
    [degrees / 360.0, saturation, value]
}

/// How RGB frames are mapped to HSV.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorStrategy {
    /// Evaluate the conversion formula per pixel.
    Direct,
    /// Index the process-wide precomputed 256^3 table.
    #[default]
    Lookup,
}

impl std::fmt::Display for ColorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "Direct"),
            Self::Lookup => write!(f, "Lookup table"),
        }
    }
}

/// Maps RGB frames to HSV images of the same extent.
///
/// Both variants produce identical values; the table only trades memory for speed.
#[derive(Clone, Copy, Debug)]
pub enum ColorMapper {
    Direct,
    Lookup(&'static HsvLookup),
}

impl ColorMapper {
    /// Resolve a strategy. `Lookup` builds the shared table on first use.
    pub fn from_strategy(strategy: ColorStrategy) -> Self {
        match strategy {
            ColorStrategy::Direct => Self::Direct,
            ColorStrategy::Lookup => Self::Lookup(HsvLookup::shared()),
        }
    }

    pub fn strategy(&self) -> ColorStrategy {
        match self {
            Self::Direct => ColorStrategy::Direct,
            Self::Lookup(_) => ColorStrategy::Lookup,
        }
    }

    #[inline]
    pub fn pixel(&self, r: u8, g: u8, b: u8) -> [f32; 3] {
        match self {
            Self::Direct => rgb_to_hsv(r, g, b),
            Self::Lookup(table) => table.get(r, g, b),
        }
    }

    /// Convert an RGB array (h, w, 3) into an HSV array (h, w, 3) of f32.
    pub fn to_hsv(&self, frame: ArrayView3<'_, u8>) -> Array3<f32> {
        let (h, w, _) = frame.dim();
        let mut hsv = Array3::<f32>::zeros((h, w, COLOR_CHANNEL_COUNT));

        let convert = |mut dst: ArrayViewMut1<f32>, src: ArrayView1<u8>| {
            let [hue, sat, val] = self.pixel(src[0], src[1], src[2]);
            dst[0] = hue;
            dst[1] = sat;
            dst[2] = val;
        };

        let zip = Zip::from(hsv.lanes_mut(Axis(2))).and(frame.lanes(Axis(2)));
        if h * w >= PARALLEL_PIXEL_THRESHOLD {
            zip.par_for_each(convert);
        } else {
            zip.for_each(convert);
        }

        hsv
    }
}
