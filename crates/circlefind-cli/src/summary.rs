use std::path::Path;

use circlefind_core::detection::DetectionConfig;
use circlefind_core::filters::effective_kernel_size;
use circlefind_core::pipeline::{BatchConfig, BatchSummary, ImageAnalysis, ImageOutcome};
use console::Style;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    ok: Style,
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
            ok: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_header(config: &BatchConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Circle Detection"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.image_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("JPEG quality"),
        s.value.apply_to(config.render.jpeg_quality)
    );
    println!();

    print_detection_section(&s, &config.detection);
}

fn print_detection_section(s: &Styles, d: &DetectionConfig) {
    println!("  {}", s.header.apply_to("Preprocessing"));
    let used = effective_kernel_size(d.blur_ksize);
    let blur = if used == d.blur_ksize {
        format!("{used}x{used}")
    } else {
        format!("{used}x{used} (requested {})", d.blur_ksize)
    };
    println!("    {:<12}{}", s.label.apply_to("Blur"), s.value.apply_to(blur));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Canny"),
        s.value.apply_to(format!("{} / {}", d.canny_threshold1, d.canny_threshold2))
    );
    println!();

    println!("  {}", s.header.apply_to("Hough Search"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Radii"),
        s.value.apply_to(format!(
            "{}..{} step {}",
            d.min_radius, d.max_radius, d.radius_step
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threshold"),
        s.value
            .apply_to(format!("{:.0}% of max", d.hough_threshold_factor * 100.0))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Separation"),
        s.value
            .apply_to(format!("x {} / y {}", d.min_xdistance, d.min_ydistance))
    );
    match d.max_circles {
        Some(n) => println!("    {:<12}{}", s.label.apply_to("Limit"), s.value.apply_to(n)),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Limit"),
            s.disabled.apply_to("none")
        ),
    }
    if !d.normalize_votes {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Votes"),
            s.disabled.apply_to("raw counts")
        );
    }
    println!();
}

pub fn print_batch_summary(summary: &BatchSummary, output_dir: &Path) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Results"));
    for outcome in &summary.outcomes {
        match outcome {
            ImageOutcome::Written {
                input, detections, ..
            } => println!(
                "    {:<32}{}",
                s.label.apply_to(file_name(input)),
                s.ok.apply_to(format!("{} circle(s)", detections.len()))
            ),
            ImageOutcome::Skipped { input, .. } => println!(
                "    {:<32}{}",
                s.label.apply_to(file_name(input)),
                s.disabled.apply_to("skipped")
            ),
        }
    }
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Processed"),
        s.value.apply_to(summary.processed())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Skipped"),
        s.value.apply_to(summary.skipped())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Circles"),
        s.value.apply_to(summary.total_detections())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Saved in"),
        s.path.apply_to(output_dir.display())
    );
    println!();
}

pub fn print_detections(analysis: &ImageAnalysis) {
    let s = Styles::new();

    println!();
    println!(
        "  {} {}",
        s.title.apply_to("Circles in"),
        s.path.apply_to(analysis.source.file_name())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!(
            "{}x{}",
            analysis.source.width(),
            analysis.source.height()
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Edge pixels"),
        s.value.apply_to(analysis.edges.edge_count())
    );
    println!();

    if analysis.detections.is_empty() {
        println!("  {}", s.disabled.apply_to("No circles found"));
        println!();
        return;
    }

    println!(
        "  {:>4}  {:>6}  {:>6}  {:>6}  {:>7}",
        s.label.apply_to("#"),
        s.label.apply_to("x"),
        s.label.apply_to("y"),
        s.label.apply_to("r"),
        s.label.apply_to("score")
    );
    for (i, det) in analysis.detections.iter().enumerate() {
        println!(
            "  {:>4}  {:>6}  {:>6}  {:>6}  {:>7.3}",
            i + 1,
            det.x,
            det.y,
            det.radius,
            det.score
        );
    }
    println!();
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
