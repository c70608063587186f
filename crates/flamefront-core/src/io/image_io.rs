use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use ndarray::{Array2, ArrayView3};

use crate::error::Result;
use crate::frame::to_rgb_image;

/// Save a boolean mask as an 8-bit grayscale PNG (true = 255).
pub fn save_mask_png(mask: &Array2<bool>, path: &Path) -> Result<()> {
    let (h, w) = mask.dim();

    let mut img = GrayImage::new(w as u32, h as u32);
    for ((row, col), &on) in mask.indexed_iter() {
        let val = if on { 255 } else { 0 };
        img.put_pixel(col as u32, row as u32, Luma([val]));
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an RGB array (h, w, 3) as an 8-bit PNG.
pub fn save_rgb_png(data: ArrayView3<'_, u8>, path: &Path) -> Result<()> {
    to_rgb_image(data).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
