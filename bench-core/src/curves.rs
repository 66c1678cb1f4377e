use crate::error::{BenchError, Result};
use crate::types::{CumulativeCurve, TimingRow, VariantStats, VARIANTS};

pub fn validate_ceiling(ceiling: f64) -> Result<f64> {
    if ceiling.is_finite() && ceiling > 0.0 {
        Ok(ceiling)
    } else {
        Err(BenchError::config(format!(
            "ceiling must be a positive number of seconds, got {ceiling}"
        )))
    }
}

/// Sorted times strictly below `ceiling`.
fn solved_set(values: impl IntoIterator<Item = f64>, ceiling: f64) -> Vec<f64> {
    let mut solved: Vec<f64> = values.into_iter().filter(|v| *v < ceiling).collect();
    solved.sort_by(f64::total_cmp);
    solved
}

pub fn cumulative_curve(values: impl IntoIterator<Item = f64>, ceiling: f64) -> CumulativeCurve {
    let values = solved_set(values, ceiling)
        .into_iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect();
    CumulativeCurve { values }
}

/// One curve per timing column. Columns are filtered independently, so the
/// curves may differ in length.
pub fn build_curves(rows: &[TimingRow], ceiling: f64) -> [CumulativeCurve; VARIANTS] {
    std::array::from_fn(|col| cumulative_curve(rows.iter().map(|r| r.column(col)), ceiling))
}

pub fn variant_stats(rows: &[TimingRow], ceiling: f64, labels: &[String]) -> Vec<VariantStats> {
    (0..VARIANTS)
        .map(|col| {
            let solved = solved_set(rows.iter().map(|r| r.column(col)), ceiling);
            let total_time: f64 = solved.iter().sum();
            let (mean_time, std_dev) = if solved.is_empty() {
                (None, None)
            } else {
                let n = solved.len() as f64;
                let mean = total_time / n;
                let var = solved.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                (Some(mean), Some(var.sqrt()))
            };
            VariantStats {
                label: labels
                    .get(col)
                    .cloned()
                    .unwrap_or_else(|| format!("variant {}", col + 1)),
                solved: solved.len(),
                unsolved: rows.len() - solved.len(),
                total_time,
                mean_time,
                std_dev,
            }
        })
        .collect()
}
