use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use tracing::{debug, error, info};

use crate::consts::{PLOT_MARGIN, PLOT_SIZE};
use crate::error::{FlameError, Result};

use super::table::read_plot_series;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXES: Rgb<u8> = Rgb([40, 40, 40]);
const ZERO_LINE: Rgb<u8> = Rgb([190, 190, 190]);
const POSITION_LINE: Rgb<u8> = Rgb([31, 119, 180]);
const SPEED_LINE: Rgb<u8> = Rgb([214, 39, 40]);
/// Tick lengths in pixels, drawn outside the panel frame.
const MAJOR_TICK: f32 = 10.0;
const MINOR_TICK: f32 = 5.0;
const TICKS_PER_AXIS: f64 = 5.0;

/// Input and output of one plot rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotRequest {
    /// Results table already written to disk.
    pub csv: PathBuf,
    pub output: PathBuf,
}

/// Turns a results table on disk into plot images.
pub trait PlotRenderer {
    fn render(&self, request: &PlotRequest) -> Result<()>;
}

/// Renders plots in a freshly spawned child process.
///
/// The child is invoked as `program [args..] --csv <CSV> --output <PNG>` and
/// is expected to call [`render_plots`].
#[derive(Clone, Debug)]
pub struct ProcessPlotRenderer {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessPlotRenderer {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Re-invoke the running executable with `args` (e.g. a hidden subcommand).
    pub fn current_exe(args: Vec<String>) -> Result<Self> {
        Ok(Self::new(std::env::current_exe()?, args))
    }
}

impl PlotRenderer for ProcessPlotRenderer {
    fn render(&self, request: &PlotRequest) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("--csv")
            .arg(&request.csv)
            .arg("--output")
            .arg(&request.output)
            .stdin(Stdio::null());
        debug!(command = ?cmd, "Spawning plot process");

        let output = cmd.output().map_err(|e| {
            FlameError::PlotProcess(format!(
                "failed to spawn {}: {e}",
                self.program.display()
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(code = output.status.code().unwrap_or(-1), %stderr, "Plot process failed");
            return Err(FlameError::PlotProcess(format!(
                "plot process exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Draw the two-panel figure for a results table: leading-edge position (cm)
/// against time on top, speed (cm/s) against time below.
///
/// Each axis gets long ticks at the ends of the data range and short ticks at
/// round values in between. The axis ranges are logged at info level.
pub fn render_plots(csv: &Path, output: &Path) -> Result<()> {
    let series = read_plot_series(csv)?;
    let (width, height) = PLOT_SIZE;
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

    let panel_w = width - 2 * PLOT_MARGIN;
    let panel_h = height / 2 - PLOT_MARGIN - PLOT_MARGIN / 2;
    let top = Rect::at(PLOT_MARGIN as i32, PLOT_MARGIN as i32).of_size(panel_w, panel_h);
    let bottom = Rect::at(PLOT_MARGIN as i32, (height / 2 + PLOT_MARGIN / 2) as i32)
        .of_size(panel_w, panel_h);

    draw_panel(&mut canvas, top, &series.seconds, &series.position_cm, POSITION_LINE);
    draw_panel(&mut canvas, bottom, &series.seconds, &series.speed, SPEED_LINE);

    canvas.save_with_format(output, ImageFormat::Png)?;
    info!(output = %output.display(), points = series.seconds.len(), "Plots written");
    Ok(())
}

fn draw_panel(canvas: &mut RgbImage, panel: Rect, xs: &[f64], ys: &[Option<f64>], color: Rgb<u8>) {
    draw_hollow_rect_mut(canvas, panel, AXES);

    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(&x, y)| y.filter(|v| v.is_finite()).map(|y| (x, y)))
        .collect();
    if points.is_empty() {
        return;
    }

    let (x_lo, x_hi) = padded_range(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = padded_range(points.iter().map(|p| p.1));
    let to_px = |x: f64, y: f64| -> (f32, f32) {
        let fx = (x - x_lo) / (x_hi - x_lo);
        let fy = (y - y_lo) / (y_hi - y_lo);
        (
            panel.left() as f32 + (fx * (panel.width() - 1) as f64) as f32,
            panel.bottom() as f32 - (fy * (panel.height() - 1) as f64) as f32,
        )
    };

    info!(x_lo, x_hi, y_lo, y_hi, "Panel axis ranges");
    draw_ticks(canvas, panel, (x_lo, x_hi), (y_lo, y_hi));

    if y_lo < 0.0 && y_hi > 0.0 {
        let (_, zy) = to_px(x_lo, 0.0);
        draw_line_segment_mut(
            canvas,
            (panel.left() as f32, zy),
            (panel.right() as f32, zy),
            ZERO_LINE,
        );
    }

    // Break the line wherever a row was missing.
    let mut prev: Option<(f32, f32)> = None;
    for (x, y) in xs.iter().zip(ys) {
        match y.filter(|v| v.is_finite()) {
            Some(y) => {
                let p = to_px(*x, y);
                if let Some(q) = prev {
                    draw_line_segment_mut(canvas, q, p, color);
                }
                prev = Some(p);
            }
            None => prev = None,
        }
    }
}

fn draw_ticks(canvas: &mut RgbImage, panel: Rect, x: (f64, f64), y: (f64, f64)) {
    let left = panel.left() as f32;
    let bottom = panel.bottom() as f32;
    let x_px = |v: f64| left + ((v - x.0) / (x.1 - x.0) * (panel.width() - 1) as f64) as f32;
    let y_px = |v: f64| bottom - ((v - y.0) / (y.1 - y.0) * (panel.height() - 1) as f64) as f32;

    let mut x_ticks: Vec<(f64, f32)> = vec![(x.0, MAJOR_TICK), (x.1, MAJOR_TICK)];
    x_ticks.extend(round_ticks(x.0, x.1).into_iter().map(|v| (v, MINOR_TICK)));
    for (v, len) in x_ticks {
        let px = x_px(v);
        draw_line_segment_mut(canvas, (px, bottom + 1.0), (px, bottom + len), AXES);
    }

    let mut y_ticks: Vec<(f64, f32)> = vec![(y.0, MAJOR_TICK), (y.1, MAJOR_TICK)];
    y_ticks.extend(round_ticks(y.0, y.1).into_iter().map(|v| (v, MINOR_TICK)));
    for (v, len) in y_ticks {
        let py = y_px(v);
        draw_line_segment_mut(canvas, (left - len, py), (left - 1.0, py), AXES);
    }
}

/// Multiples of a 1-2-5 step strictly inside `(lo, hi)`.
fn round_ticks(lo: f64, hi: f64) -> Vec<f64> {
    let raw = (hi - lo) / TICKS_PER_AXIS;
    if !raw.is_finite() || raw <= 0.0 {
        return Vec::new();
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        n if n <= 1.0 => magnitude,
        n if n <= 2.0 => 2.0 * magnitude,
        n if n <= 5.0 => 5.0 * magnitude,
        _ => 10.0 * magnitude,
    };
    let mut v = (lo / step).floor() * step + step;
    let mut ticks = Vec::new();
    while v < hi {
        if v > lo {
            ticks.push(v);
        }
        v += step;
    }
    ticks
}

/// Min/max of `values`, widened so the range is never empty.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if hi - lo < 1e-12 {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}
