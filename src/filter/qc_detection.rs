//! QC detection filtering: drop features seen in too few QC columns.

use crate::data::{FeatureTable, PrefixSet};
use crate::error::{CleanError, Result};

/// Keep features detected in more than `detection_pct` percent of QC columns.
///
/// A feature survives only if its number of non-missing QC values is strictly
/// greater than `n_qc × detection_pct / 100`. With no QC columns left the
/// threshold is zero and every feature is removed.
///
/// # Arguments
/// * `table` - The feature table to filter
/// * `qc` - The QC column group
/// * `detection_pct` - Detection limit, in percent
pub fn filter_qc_detection(
    table: &FeatureTable,
    qc: &PrefixSet,
    detection_pct: f64,
) -> Result<FeatureTable> {
    if !detection_pct.is_finite() || detection_pct < 0.0 {
        return Err(CleanError::InvalidParameter(
            "detection_pct must be a non-negative number".to_string(),
        ));
    }

    let qc_cols = table.columns_matching(qc);
    let threshold = qc_cols.len() as f64 * (detection_pct / 100.0);

    table.retain_features(|row| table.count_present(row, &qc_cols) as f64 > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> FeatureTable {
        // 4 QC columns -> threshold 2.8 at 70%
        FeatureTable::new(
            vec!["f4".into(), "f3".into(), "f2".into(), "f0".into()],
            vec!["QC1".into(), "QC2".into(), "QC3".into(), "QC4".into(), "S1".into()],
            vec![
                vec![Some(1.0), Some(1.0), Some(1.0), Some(1.0), None],
                vec![Some(1.0), None, Some(1.0), Some(1.0), None],
                vec![None, Some(1.0), None, Some(1.0), Some(9.0)],
                vec![None, None, None, None, Some(9.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_strict_threshold() {
        let table = create_test_table();
        let filtered = filter_qc_detection(&table, &PrefixSet::single("QC"), 70.0).unwrap();
        // 4 > 2.8 and 3 > 2.8 kept; 2 and 0 dropped
        assert_eq!(filtered.feature_keys(), &["f4", "f3"]);
        assert_eq!(filtered.n_columns(), 5);
    }

    #[test]
    fn test_exact_threshold_is_dropped() {
        let table = create_test_table();
        // 4 × 50% = 2: a feature with exactly 2 detections fails the strict test
        let filtered = filter_qc_detection(&table, &PrefixSet::single("QC"), 50.0).unwrap();
        assert_eq!(filtered.feature_keys(), &["f4", "f3"]);
    }

    #[test]
    fn test_zero_limit_requires_one_detection() {
        let table = create_test_table();
        let filtered = filter_qc_detection(&table, &PrefixSet::single("QC"), 0.0).unwrap();
        assert_eq!(filtered.feature_keys(), &["f4", "f3", "f2"]);
    }

    #[test]
    fn test_no_qc_columns_drops_everything() {
        let table = FeatureTable::new(
            vec!["a".into(), "b".into()],
            vec!["S1".into()],
            vec![vec![Some(1.0)], vec![Some(2.0)]],
        )
        .unwrap();
        let filtered = filter_qc_detection(&table, &PrefixSet::single("QC"), 70.0).unwrap();
        assert_eq!(filtered.n_features(), 0);
        assert_eq!(filtered.column_names(), &["S1"]);
    }

    #[test]
    fn test_invalid_limit() {
        let table = create_test_table();
        assert!(filter_qc_detection(&table, &PrefixSet::single("QC"), f64::NAN).is_err());
    }
}
