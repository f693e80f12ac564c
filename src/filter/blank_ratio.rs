//! QC/blank ratio filtering: drop features whose QC signal is too close to the blank.

use crate::data::{FeatureTable, PrefixSet};
use crate::error::{CleanError, Result};
use crate::profile::FeatureMetrics;

/// Keep features whose QC mean / blank mean ratio is at least `ratio_min`.
///
/// Means ignore missing values. A ratio that cannot be computed (no blank
/// reading, blank mean of zero, any non-finite quotient) is treated as
/// missing, and features with a missing ratio are kept.
///
/// # Arguments
/// * `table` - The feature table to filter
/// * `qc` - The QC column group
/// * `blank` - The blank column group
/// * `ratio_min` - Minimum QC/blank ratio
pub fn filter_blank_ratio(
    table: &FeatureTable,
    qc: &PrefixSet,
    blank: &PrefixSet,
    ratio_min: f64,
) -> Result<FeatureTable> {
    if !ratio_min.is_finite() || ratio_min < 0.0 {
        return Err(CleanError::InvalidParameter(
            "ratio_min must be a non-negative number".to_string(),
        ));
    }

    let qc_cols = table.columns_matching(qc);
    let blank_cols = table.columns_matching(blank);

    table.retain_features(|row| {
        match FeatureMetrics::compute(table, row, &qc_cols, &blank_cols).ratio {
            Some(ratio) => ratio >= ratio_min,
            None => true,
        }
    })
}
