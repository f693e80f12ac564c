//! Per-feature QC and blank summary statistics.
//!
//! These are the derived attributes the ratio and variability filters work
//! from. They are computed on demand and never stored as table columns.

use crate::data::{FeatureTable, PrefixSet};

/// Mean of the values, `None` when there are none.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n − 1 denominator), `None` below two values.
pub fn sample_sd(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (n - 1) as f64).sqrt())
}

/// Median of the values.
///
/// For an even count this is the lower of the two middle values, so the
/// median is always one of the observed values: totals of
/// `[80, 100, 120, 200]` have median 100.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(sorted[(sorted.len() - 1) / 2])
}

/// A quotient that is missing whenever it is not a finite number.
fn finite_ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let value = numerator? / denominator?;
    value.is_finite().then_some(value)
}

/// Derived statistics of one feature row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureMetrics {
    /// Mean of the non-missing QC values.
    pub qc_mean: Option<f64>,
    /// Mean of the non-missing blank values.
    pub blank_mean: Option<f64>,
    /// QC mean / blank mean; missing if undefined or not finite.
    pub ratio: Option<f64>,
    /// Sample SD of the non-missing QC values.
    pub qc_sd: Option<f64>,
    /// Coefficient of variation of the QC values, in percent.
    pub qc_cv: Option<f64>,
}

impl FeatureMetrics {
    /// Compute the metrics of one row given resolved QC and blank columns.
    pub fn compute(
        table: &FeatureTable,
        row: usize,
        qc_cols: &[usize],
        blank_cols: &[usize],
    ) -> Self {
        let qc = table.present_values(row, qc_cols);
        let blank = table.present_values(row, blank_cols);

        let qc_mean = mean(&qc);
        let blank_mean = mean(&blank);
        let qc_sd = sample_sd(&qc);
        let qc_cv = finite_ratio(qc_sd, qc_mean).map(|cv| cv * 100.0);

        Self {
            qc_mean,
            blank_mean,
            ratio: finite_ratio(qc_mean, blank_mean),
            qc_sd,
            qc_cv,
        }
    }
}

/// Metrics of every feature in a table.
pub fn profile_metrics(
    table: &FeatureTable,
    qc: &PrefixSet,
    blank: &PrefixSet,
) -> Vec<FeatureMetrics> {
    let qc_cols = table.columns_matching(qc);
    let blank_cols = table.columns_matching(blank);
    (0..table.n_features())
        .map(|row| FeatureMetrics::compute(table, row, &qc_cols, &blank_cols))
        .collect()
}
