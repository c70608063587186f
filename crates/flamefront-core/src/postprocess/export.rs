use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FlameError, Result};
use crate::pipeline::config::Calibration;

use super::stats::SpeedStatistics;

/// Record written next to the results table describing how it was produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub title: String,
    pub export_path: PathBuf,
    pub tool_version: String,
    pub calibration: Calibration,
    pub smoothing_window: usize,
    /// Number of frames in the analyzed sequence.
    pub analyzed_frames: usize,
    /// Source frame indices kept by auto-crop, half-open.
    pub retained_frames: Range<usize>,
    pub statistics: SpeedStatistics,
}

pub fn write_metadata(metadata: &AnalysisMetadata, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, metadata)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

pub fn read_metadata(path: &Path) -> Result<AnalysisMetadata> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write a raw leading-edge series, one value per line.
pub fn write_raw_series(values: &[usize], path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for value in values {
        writeln!(out, "{value}")?;
    }
    out.flush()?;
    Ok(())
}

/// Read a series written by [`write_raw_series`]. Blank lines are skipped.
pub fn read_raw_series(path: &Path) -> Result<Vec<usize>> {
    let reader = BufReader::new(File::open(path)?);
    let mut values = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let value = text.parse::<usize>().map_err(|e| {
            FlameError::InvalidTable(format!(
                "{}:{}: '{text}' is not a pixel column: {e}",
                path.display(),
                line_no + 1
            ))
        })?;
        values.push(value);
    }

    Ok(values)
}
