use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use bench_core::Report;
use polars::prelude::*;

/// One row per variant: solved/unsolved counts and solve-time statistics.
pub fn stats_frame(report: &Report) -> PolarsResult<DataFrame> {
    let variant: Vec<&str> = report.stats.iter().map(|s| s.label.as_str()).collect();
    let solved: Vec<u32> = report.stats.iter().map(|s| s.solved as u32).collect();
    let unsolved: Vec<u32> = report.stats.iter().map(|s| s.unsolved as u32).collect();
    let total_time: Vec<f64> = report.stats.iter().map(|s| s.total_time).collect();
    let mean_time: Vec<Option<f64>> = report.stats.iter().map(|s| s.mean_time).collect();
    let std_dev: Vec<Option<f64>> = report.stats.iter().map(|s| s.std_dev).collect();

    DataFrame::new(vec![
        Series::new("variant", variant),
        Series::new("solved", solved),
        Series::new("unsolved", unsolved),
        Series::new("total_time", total_time),
        Series::new("mean_time", mean_time),
        Series::new("std_dev", std_dev),
    ])
}

/// Every curve point in long form, variants in column order.
pub fn curves_frame(report: &Report) -> PolarsResult<DataFrame> {
    let mut variant = Vec::new();
    let mut instances = Vec::new();
    let mut cumulative = Vec::new();

    for c in &report.curves {
        for (k, v) in c.curve.points() {
            variant.push(c.label.as_str());
            instances.push(k as u32);
            cumulative.push(v);
        }
    }

    DataFrame::new(vec![
        Series::new("variant", variant),
        Series::new("instances", instances),
        Series::new("cumulative_time", cumulative),
    ])
}

pub fn write_curves_csv(report: &Report, path: &Path) -> Result<()> {
    let mut df = curves_frame(report)?;
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = df.height(), "wrote curve csv");
    Ok(())
}
