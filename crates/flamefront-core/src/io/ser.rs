use std::fs::File;
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::Array3;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{FlameError, Result};
use crate::frame::{RgbFrame, SourceInfo, SourceKind};

use super::source::FrameSource;

pub const SER_HEADER_SIZE: usize = 178;
const SER_MAGIC: &[u8; 14] = b"LUCAM-RECORDER";

/// Color layout of SER frame data, from the header's ColorID field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerColorMode {
    Mono,
    Bayer(i32),
    Rgb,
    Bgr,
}

/// SER file header (178 bytes).
#[derive(Clone, Debug)]
pub struct SerHeader {
    pub color_id: i32,
    pub little_endian: bool,
    pub width: u32,
    pub height: u32,
    pub pixel_depth: u32,
    pub frame_count: u32,
}

impl SerHeader {
    /// Bytes per pixel plane (1 for 8-bit, 2 for 9-16 bit).
    pub fn bytes_per_pixel_plane(&self) -> usize {
        if self.pixel_depth <= 8 { 1 } else { 2 }
    }

    /// Number of planes per pixel (1 for mono/bayer, 3 for RGB/BGR).
    pub fn planes_per_pixel(&self) -> usize {
        match self.color_mode() {
            SerColorMode::Rgb | SerColorMode::Bgr => 3,
            _ => 1,
        }
    }

    /// Total bytes per frame, `None` on overflow.
    pub fn frame_byte_size(&self) -> Option<usize> {
        let pixels = (self.width as usize).checked_mul(self.height as usize)?;
        pixels.checked_mul(self.bytes_per_pixel_plane() * self.planes_per_pixel())
    }

    pub fn color_mode(&self) -> SerColorMode {
        match self.color_id {
            8..=19 => SerColorMode::Bayer(self.color_id),
            100 => SerColorMode::Rgb,
            101 => SerColorMode::Bgr,
            _ => SerColorMode::Mono,
        }
    }
}

/// Memory-mapped SER video reader producing RGB frames.
pub struct SerReader {
    mmap: Mmap,
    path: PathBuf,
    frame_size: usize,
    pub header: SerHeader,
}

impl SerReader {
    /// Open a SER file and parse its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        // The mapping is read-only and the file is not modified while open.
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SER_HEADER_SIZE {
            return Err(FlameError::InvalidSer(
                "File too small for SER header".into(),
            ));
        }

        if &mmap[0..14] != SER_MAGIC {
            return Err(FlameError::InvalidSer(
                "Missing LUCAM-RECORDER magic".into(),
            ));
        }

        let header = parse_header(&mmap[..SER_HEADER_SIZE])?;
        if let SerColorMode::Bayer(id) = header.color_mode() {
            return Err(FlameError::UnsupportedColorMode(format!(
                "Bayer SER data (ColorID {id}) must be debayered first"
            )));
        }

        let frame_size = header
            .frame_byte_size()
            .ok_or_else(|| FlameError::InvalidSer("Frame size overflows".into()))?;
        let expected_data_size = frame_size
            .checked_mul(header.frame_count as usize)
            .and_then(|n| n.checked_add(SER_HEADER_SIZE))
            .ok_or_else(|| FlameError::InvalidSer("Frame data size overflows".into()))?;
        if mmap.len() < expected_data_size {
            return Err(FlameError::InvalidSer(format!(
                "File truncated: expected at least {} bytes, got {}",
                expected_data_size,
                mmap.len()
            )));
        }

        Ok(Self {
            mmap,
            path: path.to_path_buf(),
            frame_size,
            header,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    /// Get the raw bytes for a single frame (zero-copy from mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        let count = self.frame_count();
        if index >= count {
            return Err(FlameError::FrameIndexOutOfRange {
                index,
                total: count,
            });
        }
        let offset = SER_HEADER_SIZE + index * self.frame_size;
        Ok(&self.mmap[offset..offset + self.frame_size])
    }

    /// Decode a frame to 8-bit RGB. Mono data is replicated into all three
    /// channels; 16-bit samples are scaled down to 8 bits.
    pub fn read_rgb(&self, index: usize) -> Result<RgbFrame> {
        let raw = self.frame_raw(index)?;
        let h = self.header.height as usize;
        let w = self.header.width as usize;
        let bps = self.header.bytes_per_pixel_plane();
        let planes = self.header.planes_per_pixel();
        let mode = self.header.color_mode();

        let mut data = Array3::<u8>::zeros((h, w, COLOR_CHANNEL_COUNT));
        for row in 0..h {
            for col in 0..w {
                let pixel_offset = (row * w + col) * planes * bps;
                for ch in 0..COLOR_CHANNEL_COUNT {
                    let plane = match mode {
                        SerColorMode::Rgb => ch,
                        SerColorMode::Bgr => COLOR_CHANNEL_COUNT - 1 - ch,
                        _ => 0,
                    };
                    data[[row, col, ch]] = self.sample_u8(raw, pixel_offset + plane * bps);
                }
            }
        }

        Ok(RgbFrame::new(data, index))
    }

    fn sample_u8(&self, raw: &[u8], idx: usize) -> u8 {
        if self.header.bytes_per_pixel_plane() == 1 {
            return raw[idx];
        }
        let pair = [raw[idx], raw[idx + 1]];
        let value = if self.header.little_endian {
            u16::from_le_bytes(pair)
        } else {
            u16::from_be_bytes(pair)
        } as u32;
        let max_val = (1u32 << self.header.pixel_depth.min(16)) - 1;
        ((value.min(max_val) * 255 + max_val / 2) / max_val) as u8
    }
}

impl FrameSource for SerReader {
    fn len(&self) -> usize {
        self.frame_count()
    }

    fn read_frame(&self, index: usize) -> Result<RgbFrame> {
        self.read_rgb(index)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.header.width, self.header.height)
    }

    fn info(&self) -> SourceInfo {
        SourceInfo {
            path: self.path.clone(),
            kind: SourceKind::Ser,
            total_frames: self.frame_count(),
            width: self.header.width,
            height: self.header.height,
        }
    }

    /// `{parent}/{stem}_analysis` next to the video file.
    fn default_output_dir(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("video");
        let parent = self.path.parent().unwrap_or(Path::new("."));
        parent.join(format!("{stem}_analysis"))
    }
}

fn parse_header(buf: &[u8]) -> Result<SerHeader> {
    let mut cursor = std::io::Cursor::new(&buf[14..]); // skip magic

    let _lu_id = cursor.read_i32::<LittleEndian>()?;
    let color_id = cursor.read_i32::<LittleEndian>()?;
    let le_flag = cursor.read_i32::<LittleEndian>()?;
    let width = cursor.read_i32::<LittleEndian>()? as u32;
    let height = cursor.read_i32::<LittleEndian>()? as u32;
    let pixel_depth = cursor.read_i32::<LittleEndian>()? as u32;
    let frame_count = cursor.read_i32::<LittleEndian>()? as u32;

    if width == 0 || height == 0 {
        return Err(FlameError::InvalidDimensions { width, height });
    }
    if pixel_depth == 0 || pixel_depth > 16 {
        return Err(FlameError::InvalidSer(format!(
            "Unsupported pixel depth {pixel_depth}"
        )));
    }

    // Follow Siril's convention: treat 0 as little-endian.
    let little_endian = le_flag != 1;

    Ok(SerHeader {
        color_id,
        little_endian,
        width,
        height,
        pixel_depth,
        frame_count,
    })
}
