use std::path::{Path, PathBuf};

use console::Style;
use flamefront_core::io::FrameSource;
use flamefront_core::pipeline::ValidatedSession;
use flamefront_core::postprocess::{AnalysisResult, PlotOutcome};
use flamefront_core::worker::PreviewResult;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }

    fn heading(&self, text: &str) {
        println!();
        println!("  {}", self.title.apply_to(text));
        println!("  {}", self.title.apply_to("\u{2550}".repeat(text.chars().count())));
        println!();
    }
}

pub fn print_session_summary(session: &ValidatedSession, source: &dyn FrameSource, output: &Path) {
    let s = Styles::new();
    let a = &session.analysis;
    let c = &session.calibration;

    s.heading("Flame Front Analysis");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(source.path().display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(source.len())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Color"),
        s.method.apply_to(session.color_strategy)
    );
    println!();

    println!("  {}", s.header.apply_to("Crops"));
    let p = a.primary_crop;
    let b = a.secondary_crop;
    println!(
        "    {:<12}{}",
        s.label.apply_to("Primary"),
        s.value.apply_to(format!(
            "rows {}..{}, cols {}..{}",
            p.row_min, p.row_max, p.col_min, p.col_max
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Secondary"),
        s.value.apply_to(format!(
            "rows {}..{}, cols {}..{}",
            b.row_min, b.row_max, b.col_min, b.col_max
        ))
    );
    if a.mirror {
        println!("    {:<12}{}", s.label.apply_to("Mirror"), s.method.apply_to("on"));
    } else {
        println!("    {:<12}{}", s.label.apply_to("Mirror"), s.disabled.apply_to("off"));
    }
    println!();

    println!("  {}", s.header.apply_to("Thresholds"));
    for (name, range) in [("H", a.thresholds.h), ("S", a.thresholds.s), ("V", a.thresholds.v)] {
        println!(
            "    {:<12}{}",
            s.label.apply_to(name),
            s.value.apply_to(format!("{:.3} .. {:.3}", range.min, range.max))
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Calibration"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(format!("{} px = {} cm", c.pixels_in_unit, c.cm_apart))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Plate"),
        s.value.apply_to(format!(
            "{:.1} cm",
            c.estimated_plate_width(a.primary_crop.width())
        ))
    );
    println!("    {:<12}{}", s.label.apply_to("FPS"), s.value.apply_to(c.fps));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Smoothing"),
        s.value.apply_to(format!("{} frames", session.post_process.smoothing_window))
    );
    println!();
}

pub fn print_result_summary(result: &AnalysisResult) {
    let s = Styles::new();
    let st = &result.statistics;

    s.heading("Results");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Retained"),
        s.value.apply_to(format!(
            "{} of {} frames (source {}..{})",
            result.table.len(),
            result.metadata.analyzed_frames,
            result.retained.start,
            result.retained.end
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Speed"));
    println!("    {:<12}{}", s.label.apply_to("Samples"), s.value.apply_to(st.count));
    for (name, value) in [
        ("Mean", st.mean),
        ("Median", st.median),
        ("Std", st.std),
        ("Min", st.min),
        ("Max", st.max),
    ] {
        let shown = match value {
            Some(v) => s.value.apply_to(format!("{v:.4} cm/s")),
            None => s.disabled.apply_to("n/a".to_string()),
        };
        println!("    {:<12}{}", s.label.apply_to(name), shown);
    }
    println!();

    println!("  {}", s.header.apply_to("Files"));
    println!("    {:<12}{}", s.label.apply_to("Table"), s.path.apply_to(result.csv_path.display()));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Metadata"),
        s.path.apply_to(result.metadata_path.display())
    );
    match &result.plot {
        PlotOutcome::Rendered(path) => {
            println!("    {:<12}{}", s.label.apply_to("Plot"), s.path.apply_to(path.display()))
        }
        PlotOutcome::Skipped => {
            println!("    {:<12}{}", s.label.apply_to("Plot"), s.disabled.apply_to("skipped"))
        }
        PlotOutcome::Failed(reason) => println!(
            "    {:<12}{}",
            s.label.apply_to("Plot"),
            s.disabled.apply_to(format!("failed: {reason}"))
        ),
    }
    println!();
}

pub fn print_preview_summary(result: &PreviewResult, written: &[PathBuf]) {
    let s = Styles::new();
    let m = &result.measurement;

    s.heading(&format!("Frame {}", result.frame_index));

    println!("  {:<14}{}", s.label.apply_to("Leading edge"), s.value.apply_to(m.highest_column));
    println!("  {:<14}{}", s.label.apply_to("Trailing edge"), s.value.apply_to(m.lowest_column));
    let b = m.bounding_box;
    println!(
        "  {:<14}{}",
        s.label.apply_to("Bounding box"),
        s.value.apply_to(format!(
            "rows {}..={}, cols {}..={}",
            b.row_min, b.row_max, b.col_min, b.col_max
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Flame tip"),
        s.value.apply_to(format!("col {}, row {}", m.flame_tip.col, m.flame_tip.row))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Overlays"),
        s.value.apply_to(result.annotations.len())
    );
    println!();

    for path in written {
        println!("  {}", s.path.apply_to(path.display()));
    }
    println!();
}
