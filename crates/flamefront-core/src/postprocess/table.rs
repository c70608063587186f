use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{FlameError, Result};

pub const CSV_COLUMNS: [&str; 14] = [
    "frame",
    "sourceFrame",
    "highestXPos",
    "lowestXPos",
    "bboxRowMin",
    "bboxRowMax",
    "bboxColMin",
    "bboxColMax",
    "tipCol",
    "tipRow",
    "seconds",
    "highestXPosSmooth",
    "highestXPosSmoothCm",
    "highestXPosSmoothCmSpeed",
];

/// One retained frame of a post-processed run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRow {
    /// 1-based position within the retained range.
    pub frame: usize,
    /// 0-based index of the frame in the source sequence.
    pub source_frame: usize,
    pub highest_x_pos: usize,
    pub lowest_x_pos: usize,
    pub bbox_row_min: usize,
    pub bbox_row_max: usize,
    pub bbox_col_min: usize,
    pub bbox_col_max: usize,
    pub tip_col: usize,
    pub tip_row: usize,
    pub seconds: f64,
    pub highest_x_pos_smooth: Option<f64>,
    pub highest_x_pos_smooth_cm: Option<f64>,
    pub highest_x_pos_smooth_cm_speed: Option<f64>,
}

/// Row-oriented results of one run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ResultsTable {
    pub rows: Vec<ResultsRow>,
}

/// Columns needed to draw the position and speed plots.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotSeries {
    pub seconds: Vec<f64>,
    pub position_cm: Vec<Option<f64>>,
    pub speed: Vec<Option<f64>>,
}

impl ResultsTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn speeds(&self) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|r| r.highest_x_pos_smooth_cm_speed)
            .collect()
    }

    /// Write as comma-separated text with a header line. Missing values are
    /// written as empty cells.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "{}", CSV_COLUMNS.join(","))?;

        for r in &self.rows {
            writeln!(
                out,
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
                r.frame,
                r.source_frame,
                r.highest_x_pos,
                r.lowest_x_pos,
                r.bbox_row_min,
                r.bbox_row_max,
                r.bbox_col_min,
                r.bbox_col_max,
                r.tip_col,
                r.tip_row,
                r.seconds,
                cell(r.highest_x_pos_smooth),
                cell(r.highest_x_pos_smooth_cm),
                cell(r.highest_x_pos_smooth_cm_speed),
            )?;
        }

        out.flush()?;
        Ok(())
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Read the plotted columns back from a CSV written by [`ResultsTable::write_csv`].
pub fn read_plot_series(path: &Path) -> Result<PlotSeries> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines();

    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| FlameError::InvalidTable(format!("{} is empty", path.display())))?;
    let columns: Vec<&str> = header.trim().split(',').collect();
    let find = |name: &str| {
        columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| FlameError::InvalidTable(format!("missing column '{name}'")))
    };
    let seconds_idx = find("seconds")?;
    let position_idx = find("highestXPosSmoothCm")?;
    let speed_idx = find("highestXPosSmoothCmSpeed")?;

    let mut series = PlotSeries::default();
    for (line_no, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.trim_end().split(',').collect();
        let get = |idx: usize| -> Result<Option<f64>> {
            match cells.get(idx).map(|c| c.trim()) {
                None | Some("") => Ok(None),
                Some(text) => text.parse::<f64>().map(Some).map_err(|e| {
                    FlameError::InvalidTable(format!("line {}: '{text}': {e}", line_no + 2))
                }),
            }
        };

        let seconds = get(seconds_idx)?.ok_or_else(|| {
            FlameError::InvalidTable(format!("line {}: missing seconds", line_no + 2))
        })?;
        series.seconds.push(seconds);
        series.position_cm.push(get(position_idx)?);
        series.speed.push(get(speed_idx)?);
    }

    Ok(series)
}
