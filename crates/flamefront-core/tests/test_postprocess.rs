mod common;

use approx::assert_abs_diff_eq;

use flamefront_core::consts::{METADATA_NAME, RESULTS_CSV_NAME, RESULTS_PLOT_NAME};
use flamefront_core::pipeline::{Calibration, NoOpReporter, PostProcessOptions, TimeSeries};
use flamefront_core::postprocess::export::read_metadata;
use flamefront_core::postprocess::table::{read_plot_series, CSV_COLUMNS};
use flamefront_core::postprocess::{
    auto_crop_range, build_table, derivative, post_process, read_raw_series, render_plots,
    rolling_mean, summarize, write_raw_series, PlotOutcome, ProcessPlotRenderer,
};

fn calibration() -> Calibration {
    Calibration {
        pixels_in_unit: 10.0,
        cm_apart: 2.0,
        fps: 10.0,
    }
}

#[test]
fn test_auto_crop_first_positive_to_max() {
    let values = [0, 0, 3, 7, 9, 4, 0];
    let range = auto_crop_range(&values);
    assert_eq!(range, 2..4);
    assert_eq!(&values[range], &[3, 7]);
}

#[test]
fn test_auto_crop_degenerate_series() {
    assert_eq!(auto_crop_range(&[]), 0..0);
    assert!(auto_crop_range(&[0, 0, 0]).is_empty());
    // First positive value is the maximum.
    assert!(auto_crop_range(&[0, 9, 3, 1]).is_empty());
    // Ties keep the first maximum.
    assert_eq!(auto_crop_range(&[1, 5, 2, 5]), 0..1);
}

#[test]
fn test_derivative() {
    let speed = derivative(&[Some(1.0), Some(2.0), Some(4.0)], &[0.0, 1.0, 2.0]);
    assert_eq!(speed, vec![None, Some(1.0), Some(2.0)]);
}

#[test]
fn test_derivative_skips_missing_neighbours() {
    let speed = derivative(&[None, Some(2.0), Some(4.0), None], &[0.0, 0.5, 1.0, 1.5]);
    assert_eq!(speed, vec![None, None, Some(4.0), None]);
}

#[test]
fn test_rolling_mean_window() {
    let smooth = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert_eq!(smooth[0], None);
    assert_eq!(smooth[1], None);
    assert_abs_diff_eq!(smooth[2].unwrap(), 2.0);
    assert_abs_diff_eq!(smooth[3].unwrap(), 3.0);
    assert_abs_diff_eq!(smooth[4].unwrap(), 4.0);

    let identity = rolling_mean(&[1.5, 2.5], 1);
    assert_eq!(identity, vec![Some(1.5), Some(2.5)]);

    assert!(rolling_mean(&[1.0, 2.0], 5).iter().all(|v| v.is_none()));
}

#[test]
fn test_statistics() {
    let stats = summarize(&[None, Some(1.0), Some(2.0), Some(3.0), Some(6.0)]);
    assert_eq!(stats.count, 4);
    assert_abs_diff_eq!(stats.mean.unwrap(), 3.0);
    assert_abs_diff_eq!(stats.median.unwrap(), 2.5);
    assert_abs_diff_eq!(stats.min.unwrap(), 1.0);
    assert_abs_diff_eq!(stats.max.unwrap(), 6.0);
    // Sample standard deviation: sqrt(14 / 3).
    assert_abs_diff_eq!(stats.std.unwrap(), (14.0f64 / 3.0).sqrt(), epsilon = 1e-12);
}

#[test]
fn test_statistics_with_too_few_values() {
    let none = summarize(&[None, None]);
    assert_eq!(none.count, 0);
    assert!(none.mean.is_none() && none.std.is_none());

    let one = summarize(&[Some(2.0)]);
    assert_eq!(one.mean, Some(2.0));
    assert_eq!(one.median, Some(2.0));
    assert!(one.std.is_none());
}

#[test]
fn test_calibration_conversions() {
    let c = calibration();
    assert_abs_diff_eq!(c.px_to_cm(25.0), 5.0);
    assert_abs_diff_eq!(c.frame_to_seconds(5), 0.5);
    assert_abs_diff_eq!(c.estimated_plate_width(123), 24.6);
}

#[test]
fn test_build_table_rows() {
    let series = TimeSeries::from_highest_columns(&[0, 0, 10, 20, 40, 50, 30]);
    let options = PostProcessOptions { smoothing_window: 2 };
    let (table, retained) = build_table(&series, &calibration(), &options);

    assert_eq!(retained, 2..5);
    assert_eq!(table.len(), 3);

    let frames: Vec<usize> = table.rows.iter().map(|r| r.frame).collect();
    assert_eq!(frames, vec![1, 2, 3]);
    let sources: Vec<usize> = table.rows.iter().map(|r| r.source_frame).collect();
    assert_eq!(sources, vec![2, 3, 4]);
    let raw: Vec<usize> = table.rows.iter().map(|r| r.highest_x_pos).collect();
    assert_eq!(raw, vec![10, 20, 40]);

    assert_abs_diff_eq!(table.rows[0].seconds, 0.1);
    assert_eq!(table.rows[0].highest_x_pos_smooth, None);
    assert_abs_diff_eq!(table.rows[1].highest_x_pos_smooth.unwrap(), 15.0);
    assert_abs_diff_eq!(table.rows[1].highest_x_pos_smooth_cm.unwrap(), 3.0);
    assert_abs_diff_eq!(table.rows[2].highest_x_pos_smooth_cm.unwrap(), 6.0);
    assert_eq!(table.rows[1].highest_x_pos_smooth_cm_speed, None);
    assert_abs_diff_eq!(
        table.rows[2].highest_x_pos_smooth_cm_speed.unwrap(),
        30.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_post_process_writes_table_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results");
    let series = TimeSeries::from_highest_columns(&[0, 5, 10, 15, 20, 25, 3]);
    let options = PostProcessOptions { smoothing_window: 1 };

    let result = post_process(
        &series,
        &calibration(),
        &options,
        "burn 1",
        &out,
        None,
        &NoOpReporter,
    )
    .unwrap();

    assert_eq!(result.plot, PlotOutcome::Skipped);
    assert_eq!(result.csv_path, out.join(RESULTS_CSV_NAME));
    assert_eq!(result.metadata_path, out.join(METADATA_NAME));

    let csv = std::fs::read_to_string(&result.csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next().unwrap(), CSV_COLUMNS.join(","));
    assert_eq!(lines.count(), 4);

    let metadata = read_metadata(&result.metadata_path).unwrap();
    assert_eq!(metadata.title, "burn 1");
    assert_eq!(metadata.export_path, out);
    assert_eq!(metadata.analyzed_frames, 7);
    assert_eq!(metadata.retained_frames, 1..5);
    assert_eq!(metadata.smoothing_window, 1);
    assert_eq!(metadata.calibration, calibration());
    // 5 px per frame at 10 fps and 0.2 cm/px.
    assert_abs_diff_eq!(metadata.statistics.mean.unwrap(), 10.0, epsilon = 1e-9);
    assert_eq!(metadata.statistics.count, 3);

    let plot_series = read_plot_series(&result.csv_path).unwrap();
    assert_eq!(plot_series.seconds.len(), 4);
    assert_eq!(plot_series.speed[0], None);
}

#[test]
fn test_empty_cells_for_missing_values() {
    let dir = tempfile::tempdir().unwrap();
    let series = TimeSeries::from_highest_columns(&[1, 2, 3]);
    let result = post_process(
        &series,
        &calibration(),
        &PostProcessOptions::default(),
        "short",
        dir.path(),
        None,
        &NoOpReporter,
    )
    .unwrap();

    let csv = std::fs::read_to_string(&result.csv_path).unwrap();
    let first_row = csv.lines().nth(1).unwrap();
    assert!(first_row.ends_with(",,,"), "row was {first_row}");
    assert!(result.statistics.mean.is_none());
}

#[test]
fn test_plot_failure_keeps_table() {
    let dir = tempfile::tempdir().unwrap();
    let series = TimeSeries::from_highest_columns(&[0, 2, 4, 6, 8, 1]);
    let renderer = ProcessPlotRenderer::new(dir.path().join("no-such-plotter"), vec![]);

    let result = post_process(
        &series,
        &calibration(),
        &PostProcessOptions { smoothing_window: 1 },
        "plot failure",
        dir.path(),
        Some(&renderer),
        &NoOpReporter,
    )
    .unwrap();

    assert!(matches!(result.plot, PlotOutcome::Failed(_)));
    assert!(result.csv_path.exists());
    assert!(result.metadata_path.exists());
    assert!(!dir.path().join(RESULTS_PLOT_NAME).exists());
}

#[test]
fn test_render_plots_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let series = TimeSeries::from_highest_columns(&[0, 3, 5, 9, 14, 20, 27, 2]);
    let result = post_process(
        &series,
        &calibration(),
        &PostProcessOptions { smoothing_window: 2 },
        "plot",
        dir.path(),
        None,
        &NoOpReporter,
    )
    .unwrap();

    let png = dir.path().join(RESULTS_PLOT_NAME);
    render_plots(&result.csv_path, &png).unwrap();
    let img = image::open(&png).unwrap();
    assert_eq!((img.width(), img.height()), (1000, 1000));
}

#[test]
fn test_plot_marks_data_range_ends() {
    let dir = tempfile::tempdir().unwrap();
    let series = TimeSeries::from_highest_columns(&[0, 3, 5, 9, 14, 20, 27, 2]);
    let result = post_process(
        &series,
        &calibration(),
        &PostProcessOptions { smoothing_window: 1 },
        "ticks",
        dir.path(),
        None,
        &NoOpReporter,
    )
    .unwrap();

    let png = dir.path().join(RESULTS_PLOT_NAME);
    render_plots(&result.csv_path, &png).unwrap();
    let img = image::open(&png).unwrap().to_rgb8();

    // Top panel frame: left edge at x = 60, bottom edge at y = 469.
    let white = image::Rgb([255, 255, 255]);
    assert_ne!(*img.get_pixel(60, 476), white, "no tick below the first sample");
    assert_ne!(*img.get_pixel(53, 469), white, "no tick left of the lowest value");
    assert_eq!(*img.get_pixel(30, 469), white);
}

#[test]
fn test_raw_series_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highestXPos.txt");
    write_raw_series(&[0, 4, 12, 0], &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "0\n4\n12\n0\n");
    assert_eq!(read_raw_series(&path).unwrap(), vec![0, 4, 12, 0]);

    std::fs::write(&path, "1\nabc\n").unwrap();
    assert!(read_raw_series(&path).is_err());
}
