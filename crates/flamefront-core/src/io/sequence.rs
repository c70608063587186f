use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::IMAGE_SEQUENCE_EXTENSIONS;
use crate::error::{FlameError, Result};
use crate::frame::{RgbFrame, SourceInfo, SourceKind};

use super::source::FrameSource;

/// A directory of still images read in file-name order, one frame per file.
pub struct ImageSequence {
    dir: PathBuf,
    files: Vec<PathBuf>,
    width: u32,
    height: u32,
}

impl ImageSequence {
    /// List the image files in `dir`. The first file fixes the reported dimensions.
    pub fn open(dir: &Path) -> Result<Self> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image_file(p))
            .collect();
        files.sort();

        let first = files.first().ok_or(FlameError::EmptySequence)?;
        let (width, height) = image::image_dimensions(first)?;
        debug!(frames = files.len(), width, height, dir = %dir.display(), "Opened image sequence");

        Ok(Self {
            dir: dir.to_path_buf(),
            files,
            width,
            height,
        })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl FrameSource for ImageSequence {
    fn len(&self) -> usize {
        self.files.len()
    }

    fn read_frame(&self, index: usize) -> Result<RgbFrame> {
        let path = self
            .files
            .get(index)
            .ok_or(FlameError::FrameIndexOutOfRange {
                index,
                total: self.files.len(),
            })?;
        let img = image::open(path)?.to_rgb8();
        Ok(RgbFrame::from_rgb_image(&img, index))
    }

    fn path(&self) -> &Path {
        &self.dir
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn info(&self) -> SourceInfo {
        SourceInfo {
            path: self.dir.clone(),
            kind: SourceKind::ImageSequence,
            total_frames: self.files.len(),
            width: self.width,
            height: self.height,
        }
    }

    /// Results are written next to the frames.
    fn default_output_dir(&self) -> PathBuf {
        self.dir.clone()
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_SEQUENCE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}
