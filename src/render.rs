use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use bench_core::{Report, VariantStats, VARIANTS};
use clap::ValueEnum;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Line colours for the cactus chart, in column order.
const LINE_PALETTE: [RGBColor; VARIANTS] = [RED, YELLOW, BLUE, GREEN];

const BAR_PALETTE: [RGBColor; VARIANTS] = [
    RGBColor(0xFF, 0xA0, 0x56),
    RGBColor(0x0B, 0x84, 0xA5),
    RGBColor(0xCA, 0x47, 0x2F),
    RGBColor(0x6F, 0x4E, 0x7C),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Cumulative solve time over the number of solved instances.
    Cactus,
    /// Mean solve time per variant with a standard-deviation error bar.
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Png,
    Svg,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub kind: ChartKind,
    pub format: ImageFormat,
}

impl RenderConfig {
    pub fn suffix(&self) -> &'static str {
        match (self.kind, self.format) {
            (ChartKind::Cactus, ImageFormat::Png) => ".png",
            (ChartKind::Cactus, ImageFormat::Svg) => ".svg",
            (ChartKind::Bar, ImageFormat::Png) => ".bar.png",
            (ChartKind::Bar, ImageFormat::Svg) => ".bar.svg",
        }
    }

    pub fn size(&self) -> (u32, u32) {
        match self.kind {
            ChartKind::Cactus => (1024, 768),
            ChartKind::Bar => (1169, 400),
        }
    }

    /// `<input><suffix>`, next to the input file.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let mut name = OsString::from(input.as_os_str());
        name.push(self.suffix());
        PathBuf::from(name)
    }
}

pub fn render(report: &Report, cfg: &RenderConfig, out: &Path) -> Result<()> {
    let drawn = match cfg.format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(out, cfg.size()).into_drawing_area();
            draw(&root, report, cfg.kind).map_err(|e| e.to_string())
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(out, cfg.size()).into_drawing_area();
            draw(&root, report, cfg.kind).map_err(|e| e.to_string())
        }
    };
    drawn.map_err(|e| anyhow!("failed to draw {}: {e}", out.display()))
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    report: &Report,
    kind: ChartKind,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    match kind {
        ChartKind::Cactus => draw_cactus(root, report)?,
        ChartKind::Bar => draw_bars(root, &report.stats)?,
    }
    root.present()
}

/// Axis extents for the cactus chart; never empty so plotters can lay out a mesh.
pub(crate) fn cactus_bounds(report: &Report) -> (usize, f64) {
    let x_max = report.longest_curve().max(1);
    let y_max = (report.max_cumulative() * 1.05).max(1.0);
    (x_max, y_max)
}

fn draw_cactus<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    report: &Report,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (x_max, y_max) = cactus_bounds(report);
    let mut chart = ChartBuilder::on(root)
        .caption("Benchmark", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0usize..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("number of instances")
        .y_desc("time (s)")
        .draw()?;

    for (curve, color) in report.curves.iter().zip(LINE_PALETTE) {
        chart
            .draw_series(LineSeries::new(curve.curve.points(), color.stroke_width(2)))?
            .label(curve.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// `(low, mean, high)` of the error bar, clamped at zero; `None` when nothing was solved.
pub(crate) fn error_span(stats: &VariantStats) -> Option<(f64, f64, f64)> {
    let mean = stats.mean_time?;
    let sd = stats.std_dev.unwrap_or(0.0);
    Some(((mean - sd).max(0.0), mean, mean + sd))
}

pub(crate) fn bar_extent(stats: &[VariantStats]) -> f64 {
    let widest = stats
        .iter()
        .filter_map(error_span)
        .map(|(_, _, high)| high)
        .fold(0.0, f64::max);
    (widest * 1.1).max(1.0)
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    stats: &[VariantStats],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = stats.len();
    // Slot 0 is the bottom of the chart; the first variant goes on top.
    let slot = |idx: usize| n - 1 - idx;

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(140)
        .build_cartesian_2d(0f64..bar_extent(stats), (0..n).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("mean time (s)")
        .y_label_formatter(&|v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(s) if *s < n => stats[n - 1 - *s].label.clone(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(stats.iter().enumerate().filter_map(|(idx, s)| {
        let mean = s.mean_time?;
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(slot(idx))),
                (mean, SegmentValue::Exact(slot(idx) + 1)),
            ],
            BAR_PALETTE[idx % VARIANTS].filled(),
        );
        bar.set_margin(8, 8, 0, 0);
        Some(bar)
    }))?;

    chart.draw_series(stats.iter().enumerate().filter_map(|(idx, s)| {
        let (low, mean, high) = error_span(s)?;
        Some(ErrorBar::new_horizontal(
            SegmentValue::CenterOf(slot(idx)),
            low,
            mean,
            high,
            BLACK.filled(),
            12,
        ))
    }))?;

    Ok(())
}
