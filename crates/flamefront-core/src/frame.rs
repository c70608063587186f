use std::path::PathBuf;

use image::RgbImage;
use ndarray::{Array3, ArrayView3};

use crate::consts::COLOR_CHANNEL_COUNT;

/// A single RGB video frame.
/// Pixel data is u8, shape = (height, width, 3), channel order R, G, B.
#[derive(Clone, Debug)]
pub struct RgbFrame {
    pub data: Array3<u8>,
    /// Position of the frame in its source sequence.
    pub index: usize,
}

impl RgbFrame {
    pub fn new(data: Array3<u8>, index: usize) -> Self {
        Self { data, index }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Convert an `image` RGB buffer into a frame.
    pub fn from_rgb_image(img: &RgbImage, index: usize) -> Self {
        let (w, h) = img.dimensions();
        let mut data = Array3::<u8>::zeros((h as usize, w as usize, COLOR_CHANNEL_COUNT));
        for (col, row, pixel) in img.enumerate_pixels() {
            for ch in 0..COLOR_CHANNEL_COUNT {
                data[[row as usize, col as usize, ch]] = pixel.0[ch];
            }
        }
        Self::new(data, index)
    }
}

/// Convert any RGB array view back into an `image` buffer (for saving crops).
pub fn to_rgb_image(data: ArrayView3<'_, u8>) -> RgbImage {
    let (h, w, _) = data.dim();
    RgbImage::from_fn(w as u32, h as u32, |col, row| {
        let (r, c) = (row as usize, col as usize);
        image::Rgb([data[[r, c, 0]], data[[r, c, 1]], data[[r, c, 2]]])
    })
}

/// Kind of container a frame source reads from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SourceKind {
    ImageSequence,
    Ser,
}

/// Metadata about a frame source.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub total_frames: usize,
    pub width: u32,
    pub height: u32,
}
