use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{BenchError, Result};
use crate::types::{TimingRow, VARIANTS};

/// Lines discarded at the top of every benchmark report.
pub const HEADER_LINES: usize = 2;
/// Lines discarded at the bottom of every benchmark report.
pub const TRAILER_LINES: usize = 1;
pub const DELIMITER: char = '|';
/// Bookkeeping fields in front of the timings (instance labels).
pub const LEADING_FIELDS: usize = 2;
/// Bookkeeping fields after the timings.
pub const TRAILING_FIELDS: usize = 1;

/// What to do with a data row that does not yield four timings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MalformedRows {
    /// Fail the whole load on the first malformed row.
    #[default]
    Abort,
    /// Log and drop malformed rows.
    Skip,
}

/// Negative and NaN values are refused so every curve stays non-decreasing.
fn parse_timing(field: &str) -> Result<f64, String> {
    let trimmed = field.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("timing {trimmed:?} is not a number"))?;
    if value.is_nan() || value < 0.0 {
        return Err(format!("timing {trimmed:?} is not a non-negative duration"));
    }
    Ok(value)
}

pub(crate) fn parse_row(line: &str) -> Result<TimingRow, String> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let timing_count = fields
        .len()
        .saturating_sub(LEADING_FIELDS + TRAILING_FIELDS);
    if timing_count < VARIANTS {
        return Err(format!(
            "expected {VARIANTS} timing fields, found {timing_count}"
        ));
    }

    // Anything between the fourth timing and the trailing field is ignored.
    let mut times = [0.0; VARIANTS];
    for (slot, field) in times
        .iter_mut()
        .zip(&fields[LEADING_FIELDS..fields.len() - TRAILING_FIELDS])
    {
        *slot = parse_timing(field)?;
    }
    Ok(TimingRow::new(times))
}

/// Extracts the timing rows from the text of a benchmark report.
///
/// The first [`HEADER_LINES`] and the last [`TRAILER_LINES`] lines are dropped
/// before anything else, whatever they contain. Blank lines in between are
/// ignored.
pub fn parse_records(raw: &str, policy: MalformedRows) -> Result<Vec<TimingRow>> {
    let lines: Vec<&str> = raw.lines().collect();
    let end = lines.len().saturating_sub(TRAILER_LINES);
    let body = lines.get(HEADER_LINES..end).unwrap_or(&[]);

    let mut rows = Vec::with_capacity(body.len());
    let mut skipped = 0usize;

    for (offset, line) in body.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = HEADER_LINES + offset + 1;

        match parse_row(line) {
            Ok(row) => rows.push(row),
            Err(reason) => match policy {
                MalformedRows::Abort => return Err(BenchError::parse(line_no, line, reason)),
                MalformedRows::Skip => {
                    tracing::warn!(line = line_no, %reason, "skipping malformed row");
                    skipped += 1;
                }
            },
        }
    }

    tracing::debug!(rows = rows.len(), skipped, "parsed benchmark rows");
    Ok(rows)
}

pub fn load_records(path: impl AsRef<Path>, policy: MalformedRows) -> Result<Vec<TimingRow>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "read benchmark file");
    parse_records(&raw, policy)
}
