use std::path::{Path, PathBuf};

use crate::error::{FlameError, Result};
use crate::frame::{RgbFrame, SourceInfo};

use super::sequence::ImageSequence;
use super::ser::SerReader;

/// Random-access provider of RGB frames, indexed by frame number.
pub trait FrameSource: Send + Sync {
    /// Number of frames available.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode frame `index`. Fails for out-of-range indices or unreadable data.
    fn read_frame(&self, index: usize) -> Result<RgbFrame>;

    /// Stable identifier of the source on disk.
    fn path(&self) -> &Path;

    /// Frame (width, height) in pixels.
    fn dimensions(&self) -> (u32, u32);

    fn info(&self) -> SourceInfo;

    /// Where analysis results go when the caller does not choose a directory.
    fn default_output_dir(&self) -> PathBuf;
}

/// Open a directory as an image sequence, or a `.ser` file as a SER video.
pub fn open_source(path: &Path) -> Result<Box<dyn FrameSource>> {
    if path.is_dir() {
        return Ok(Box::new(ImageSequence::open(path)?));
    }

    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("ser") => Ok(Box::new(SerReader::open(path)?)),
        _ => Err(FlameError::UnsupportedSource(format!(
            "{} is neither an image directory nor a SER video",
            path.display()
        ))),
    }
}
