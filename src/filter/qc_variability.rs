//! QC variability filtering: drop features with a high coefficient of variation in QC.

use crate::data::{FeatureTable, PrefixSet};
use crate::error::{CleanError, Result};
use crate::profile::FeatureMetrics;

/// Keep features whose QC coefficient of variation is at most `cv_max_pct`.
///
/// CV = sample SD (n − 1) / mean × 100 over the non-missing QC values. Features
/// with an undefined CV (fewer than two QC readings, or a QC mean of zero) are
/// removed.
///
/// # Arguments
/// * `table` - The feature table to filter
/// * `qc` - The QC column group
/// * `cv_max_pct` - Maximum CV, in percent
pub fn filter_qc_variability(
    table: &FeatureTable,
    qc: &PrefixSet,
    cv_max_pct: f64,
) -> Result<FeatureTable> {
    if !cv_max_pct.is_finite() || cv_max_pct < 0.0 {
        return Err(CleanError::InvalidParameter(
            "cv_max_pct must be a non-negative number".to_string(),
        ));
    }

    let qc_cols = table.columns_matching(qc);

    table.retain_features(|row| {
        FeatureMetrics::compute(table, row, &qc_cols, &[])
            .qc_cv
            .map_or(false, |cv| cv <= cv_max_pct)
    })
}
