mod curves;
mod error;
mod parsing;
mod types;

use std::path::Path;

pub use curves::{build_curves, cumulative_curve, validate_ceiling, variant_stats};
pub use error::{BenchError, Result};
pub use parsing::{
    load_records, parse_records, MalformedRows, DELIMITER, HEADER_LINES, LEADING_FIELDS,
    TRAILER_LINES, TRAILING_FIELDS,
};
pub use types::{
    CumulativeCurve, LabeledCurve, Report, TimingRow, VariantStats, DEFAULT_CEILING,
    DEFAULT_LABELS, VARIANTS,
};

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub ceiling: f64,
    pub malformed: MalformedRows,
    /// Legend labels in column order.
    pub labels: [String; VARIANTS],
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            malformed: MalformedRows::default(),
            labels: DEFAULT_LABELS.map(String::from),
        }
    }
}

pub fn summarize(rows: &[TimingRow], opts: &AnalysisOptions) -> Result<Report> {
    let ceiling = validate_ceiling(opts.ceiling)?;

    let curves = build_curves(rows, ceiling)
        .into_iter()
        .zip(opts.labels.iter())
        .map(|(curve, label)| LabeledCurve {
            label: label.clone(),
            curve,
        })
        .collect();
    let stats = variant_stats(rows, ceiling, &opts.labels);

    Ok(Report {
        ceiling,
        instances: rows.len(),
        curves,
        stats,
    })
}

pub fn analyze(raw: &str, opts: &AnalysisOptions) -> Result<Report> {
    let rows = parse_records(raw, opts.malformed)?;
    summarize(&rows, opts)
}

/// Checks the ceiling before touching the file.
pub fn analyze_file(path: impl AsRef<Path>, opts: &AnalysisOptions) -> Result<Report> {
    validate_ceiling(opts.ceiling)?;
    let rows = load_records(path, opts.malformed)?;
    summarize(&rows, opts)
}

pub fn analyze_json(raw: &str, opts: &AnalysisOptions) -> Result<String> {
    let report = analyze(raw, opts)?;
    Ok(serde_json::to_string(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> &'static str {
        "Instance | Group | QASP | QASP (C) | QASP (A) | DEMACS | Status\n\
         ----------------------------------------------------------\n\
         inst-01 | g1 | 1.0 | 2.0 | 700.0 | 5.0 | ok\n\
         inst-02 | g1 | 3.0 | 1.0 | 4.0 | 2.0 | ok\n\
         2 instances"
    }

    #[test]
    fn parses_and_summarizes() {
        let report = analyze(sample_report(), &AnalysisOptions::default()).unwrap();
        assert_eq!(report.instances, 2);
        assert_eq!(report.curves.len(), VARIANTS);
        assert_eq!(report.curves[0].label, "QASP");
        assert_eq!(report.curves[0].curve.values(), &[1.0, 4.0]);
        assert_eq!(report.curves[2].curve.values(), &[4.0]);
        assert_eq!(report.stats[2].unsolved, 1);
        assert_eq!(report.longest_curve(), 2);
        assert_eq!(report.max_cumulative(), 7.0);
    }

    #[test]
    fn malformed_row_produces_no_report() {
        let raw = "h\nh\na|b|1|2|3|c\nt";
        assert!(matches!(
            analyze(raw, &AnalysisOptions::default()),
            Err(BenchError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn skip_policy_keeps_good_rows() {
        let raw = "h\nh\na|b|1|2|3|c\na|b|1|2|3|4|c\nt";
        let opts = AnalysisOptions {
            malformed: MalformedRows::Skip,
            ..AnalysisOptions::default()
        };
        assert_eq!(analyze(raw, &opts).unwrap().instances, 1);
    }

    #[test]
    fn custom_ceiling_changes_solved_set() {
        let opts = AnalysisOptions {
            ceiling: 2.5,
            ..AnalysisOptions::default()
        };
        let report = analyze(sample_report(), &opts).unwrap();
        assert_eq!(report.curves[0].curve.values(), &[1.0]);
        assert_eq!(report.curves[3].curve.values(), &[2.0]);
    }

    #[test]
    fn invalid_ceiling_is_rejected_before_reading() {
        let opts = AnalysisOptions {
            ceiling: -5.0,
            ..AnalysisOptions::default()
        };
        assert!(matches!(
            analyze_file("/definitely/not/here.txt", &opts),
            Err(BenchError::Config(_))
        ));
    }

    #[test]
    fn invalid_ceiling_is_rejected_for_in_memory_input() {
        let opts = AnalysisOptions {
            ceiling: f64::NAN,
            ..AnalysisOptions::default()
        };
        assert!(matches!(
            analyze(sample_report(), &opts),
            Err(BenchError::Config(_))
        ));
    }

    #[test]
    fn empty_report_serializes() {
        let json = analyze_json("h\nh\nt", &AnalysisOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["instances"], 0);
        assert_eq!(value["curves"][3]["label"], "DEMACS");
        assert_eq!(value["curves"][3]["curve"], serde_json::json!([]));
    }
}
