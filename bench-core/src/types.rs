use serde::Serialize;

/// Number of solver variants (timing columns) per data row.
pub const VARIANTS: usize = 4;

/// Timing threshold in seconds; values at or above it count as unsolved.
pub const DEFAULT_CEILING: f64 = 600.0;

pub const DEFAULT_LABELS: [&str; VARIANTS] = ["QASP", "QASP (C)", "QASP (A)", "DEMACS"];

/// One data row: the four solver timings in column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingRow {
    pub times: [f64; VARIANTS],
}

impl TimingRow {
    pub fn new(times: [f64; VARIANTS]) -> Self {
        Self { times }
    }

    pub fn column(&self, idx: usize) -> f64 {
        self.times[idx]
    }
}

/// Running sum over the sorted solved times of one variant.
///
/// Entry `k - 1` is the total time needed to solve the `k` fastest instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CumulativeCurve {
    pub(crate) values: Vec<f64>,
}

impl CumulativeCurve {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// `(k, cumulative)` pairs with 1-based `k`.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, v)| (i + 1, *v))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LabeledCurve {
    pub label: String,
    pub curve: CumulativeCurve,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantStats {
    pub label: String,
    pub solved: usize,
    pub unsolved: usize,
    pub total_time: f64,
    pub mean_time: Option<f64>,
    pub std_dev: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub ceiling: f64,
    pub instances: usize,
    pub curves: Vec<LabeledCurve>,
    pub stats: Vec<VariantStats>,
}

impl Report {
    pub fn max_cumulative(&self) -> f64 {
        self.curves
            .iter()
            .map(|c| c.curve.total())
            .fold(0.0, f64::max)
    }

    pub fn longest_curve(&self) -> usize {
        self.curves.iter().map(|c| c.curve.len()).max().unwrap_or(0)
    }
}
