#![allow(dead_code)]

use std::path::{Path, PathBuf};

use flamefront_core::detection::{HsvRange, HsvThresholds};
use flamefront_core::frame::{to_rgb_image, RgbFrame};
use flamefront_core::io::ser::SER_HEADER_SIZE;
use flamefront_core::io::CropBox;
use flamefront_core::pipeline::AnalysisConfig;
use ndarray::Array3;

/// Thresholds that keep near-white pixels only.
pub fn white_thresholds() -> HsvThresholds {
    HsvThresholds::new(
        HsvRange::FULL,
        HsvRange::new(0.0, 0.1),
        HsvRange::new(0.9, 1.0),
    )
}

pub fn full_frame_config(height: usize, width: usize) -> AnalysisConfig {
    AnalysisConfig {
        primary_crop: CropBox::full(height, width),
        secondary_crop: CropBox::full(height, width),
        mirror: false,
        thresholds: white_thresholds(),
    }
}

pub fn black_frame(height: usize, width: usize) -> Array3<u8> {
    Array3::zeros((height, width, 3))
}

/// Black frame with a white `size` x `size` square whose top-left corner is
/// at (`row`, `col`).
pub fn frame_with_square(
    height: usize,
    width: usize,
    row: usize,
    col: usize,
    size: usize,
) -> Array3<u8> {
    let mut frame = black_frame(height, width);
    for r in row..(row + size).min(height) {
        for c in col..(col + size).min(width) {
            for ch in 0..3 {
                frame[[r, c, ch]] = 255;
            }
        }
    }
    frame
}

/// Ten frames: black for 0-2 and 8-9, a 5x5 white square at column
/// 10 + 2 * (i - 3) for frames 3-7.
pub fn moving_square_sequence(height: usize, width: usize) -> Vec<Array3<u8>> {
    (0..10)
        .map(|i| {
            if (3..=7).contains(&i) {
                frame_with_square(height, width, 5, 10 + 2 * (i - 3), 5)
            } else {
                black_frame(height, width)
            }
        })
        .collect()
}

/// Write frames as zero-padded PNG files into `dir`.
pub fn write_png_sequence(dir: &Path, frames: &[Array3<u8>]) -> Vec<PathBuf> {
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let path = dir.join(format!("frame_{i:04}.png"));
            to_rgb_image(frame.view()).save(&path).expect("write frame png");
            path
        })
        .collect()
}

/// Build a SER file header with configurable bit depth and color mode.
///
/// `color_id`: 0=MONO, 8..=19=BAYER_*, 100=RGB, 101=BGR
pub fn build_ser_header(
    width: u32,
    height: u32,
    bit_depth: u32,
    num_frames: usize,
    color_id: i32,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);

    // Magic (14 bytes)
    buf.extend_from_slice(b"LUCAM-RECORDER");
    // LuID
    buf.extend_from_slice(&0i32.to_le_bytes());
    // ColorID
    buf.extend_from_slice(&color_id.to_le_bytes());
    // LittleEndian = 0 (little-endian per Siril convention)
    buf.extend_from_slice(&0i32.to_le_bytes());
    buf.extend_from_slice(&(width as i32).to_le_bytes());
    buf.extend_from_slice(&(height as i32).to_le_bytes());
    buf.extend_from_slice(&(bit_depth as i32).to_le_bytes());
    buf.extend_from_slice(&(num_frames as i32).to_le_bytes());
    // Observer, Instrument, Telescope (40 bytes each)
    buf.extend_from_slice(&[0u8; 120]);
    // DateTime, DateTimeUTC
    buf.extend_from_slice(&0u64.to_le_bytes());
    buf.extend_from_slice(&0u64.to_le_bytes());

    assert_eq!(buf.len(), SER_HEADER_SIZE);
    buf
}

/// Complete 8-bit RGB SER file holding `frames`.
pub fn build_rgb_ser(frames: &[Array3<u8>]) -> Vec<u8> {
    let (h, w, _) = frames[0].dim();
    let mut buf = build_ser_header(w as u32, h as u32, 8, frames.len(), 100);
    for frame in frames {
        buf.extend(frame.iter().copied());
    }
    buf
}

/// Write a SER buffer to `dir/name`.
pub fn write_ser(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("write SER data");
    path
}

/// In-memory frame source for driving the pipeline without files.
pub struct MemorySource {
    pub frames: Vec<Array3<u8>>,
    pub path: PathBuf,
}

impl MemorySource {
    pub fn new(frames: Vec<Array3<u8>>) -> Self {
        Self {
            frames,
            path: PathBuf::from("memory"),
        }
    }
}

impl flamefront_core::io::FrameSource for MemorySource {
    fn len(&self) -> usize {
        self.frames.len()
    }

    fn read_frame(&self, index: usize) -> flamefront_core::error::Result<RgbFrame> {
        self.frames
            .get(index)
            .map(|f| RgbFrame::new(f.clone(), index))
            .ok_or(flamefront_core::error::FlameError::FrameIndexOutOfRange {
                index,
                total: self.frames.len(),
            })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn dimensions(&self) -> (u32, u32) {
        self.frames
            .first()
            .map(|f| (f.dim().1 as u32, f.dim().0 as u32))
            .unwrap_or((0, 0))
    }

    fn info(&self) -> flamefront_core::frame::SourceInfo {
        let (width, height) = self.dimensions();
        flamefront_core::frame::SourceInfo {
            path: self.path.clone(),
            kind: flamefront_core::frame::SourceKind::ImageSequence,
            total_frames: self.frames.len(),
            width,
            height,
        }
    }

    fn default_output_dir(&self) -> PathBuf {
        self.path.clone()
    }
}
