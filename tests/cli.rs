use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const REPORT: &str = "\
Instance | Family | QASP | QASP (C) | QASP (A) | DEMACS | Status
----------------------------------------------------------------
inst-01 | f1 | 1.0 | 2.0 | 700.0 | 5.0 | ok
inst-02 | f1 | 3.0 | 1.0 | 4.0 | 2.0 | ok
2 instances
";

fn write_report(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("results.txt");
    fs::write(&path, body).unwrap();
    path
}

fn bench_plot() -> Command {
    Command::cargo_bin("bench_plot").unwrap()
}

#[test]
fn missing_input_prints_usage_to_stdout() {
    bench_plot()
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn empty_input_prints_usage_to_stdout() {
    bench_plot()
        .arg("")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    bench_plot()
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn malformed_row_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path(), "h\nh\na|b|1|2|3|4|c\na|b|1|2|3|c\nt\n");
    bench_plot()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 4"));
    assert!(!dir.path().join("results.txt.png").exists());
}

#[test]
fn skip_malformed_continues() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path(), "h\nh\na|b|1|2|3|4|c\na|b|1|2|3|c\nt\n");
    let out = bench_plot()
        .arg(&input)
        .args(["--skip-malformed", "--no-plot", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["instances"], 1);
}

#[test]
fn json_report_holds_curves() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path(), REPORT);
    let out = bench_plot()
        .arg(&input)
        .args(["--no-plot", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["ceiling"], 600.0);
    assert_eq!(report["curves"][0]["curve"], serde_json::json!([1.0, 4.0]));
    assert_eq!(report["curves"][2]["curve"], serde_json::json!([4.0]));
}

#[test]
fn summary_and_csv_without_plot() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path(), REPORT);
    let csv = dir.path().join("curves.csv");
    bench_plot()
        .arg(&input)
        .args(["--no-plot", "--summary", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("DEMACS"));
    let text = fs::read_to_string(&csv).unwrap();
    assert!(text.starts_with("variant,instances,cumulative_time"));
    assert!(!dir.path().join("results.txt.png").exists());
}

#[test]
fn invalid_ceiling_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path(), REPORT);
    bench_plot()
        .arg(&input)
        .args(["--ceiling", "0", "--no-plot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ceiling"));
}

fn assert_non_empty(path: &Path) {
    let len = fs::metadata(path)
        .unwrap_or_else(|e| panic!("{} not written: {e}", path.display()))
        .len();
    assert!(len > 0, "{} is empty", path.display());
}

#[test]
fn default_run_writes_png_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path(), REPORT);
    bench_plot().arg(&input).assert().success();
    assert_non_empty(&dir.path().join("results.txt.png"));
}

#[test]
fn bar_chart_uses_bar_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path(), REPORT);
    bench_plot()
        .arg(&input)
        .args(["--chart", "bar"])
        .assert()
        .success();
    assert_non_empty(&dir.path().join("results.txt.bar.png"));
    assert!(!dir.path().join("results.txt.png").exists());
}

#[test]
fn svg_format_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path(), REPORT);
    bench_plot()
        .arg(&input)
        .args(["--format", "svg"])
        .assert()
        .success();
    let svg = dir.path().join("results.txt.svg");
    assert_non_empty(&svg);
    assert!(fs::read_to_string(&svg).unwrap().contains("<svg"));
}

#[test]
fn output_flag_overrides_chart_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path(), REPORT);
    let out = dir.path().join("chart.png");
    bench_plot()
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    assert_non_empty(&out);
    assert!(!dir.path().join("results.txt.png").exists());
}

#[test]
fn empty_report_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_report(dir.path(), "h\nh\nt\n");
    bench_plot().arg(&input).assert().success();
    assert_non_empty(&dir.path().join("results.txt.png"));
}
