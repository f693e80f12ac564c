//! QC drift filtering: drop QC columns whose total intensity strays from the QC median.

use crate::data::{FeatureTable, PrefixSet};
use crate::error::{CleanError, Result};
use crate::profile::profile_qc_drift;
use log::debug;

/// Remove QC columns whose total lies outside `100 ± deviation_pct` percent of
/// the median QC total.
///
/// Column totals ignore missing values. The band is inclusive at both ends;
/// a column whose percentage is not finite (median total of zero) is dropped.
/// Non-QC columns are untouched and keep their positions, and no rows are
/// removed.
///
/// # Arguments
/// * `table` - The feature table to filter
/// * `qc` - The QC column group
/// * `deviation_pct` - Allowed deviation from the median, in percent
///
/// # Errors
/// `EmptyGroup` if no column belongs to the QC group.
pub fn filter_qc_drift(
    table: &FeatureTable,
    qc: &PrefixSet,
    deviation_pct: f64,
) -> Result<FeatureTable> {
    if !deviation_pct.is_finite() || deviation_pct < 0.0 {
        return Err(CleanError::InvalidParameter(
            "deviation_pct must be a non-negative number".to_string(),
        ));
    }

    let profile = profile_qc_drift(table, qc);
    if profile.columns.is_empty() {
        return Err(CleanError::EmptyGroup {
            group: "QC".to_string(),
            prefix: qc.to_string(),
        });
    }

    debug!("{}", profile);

    let dropped: Vec<usize> = profile
        .columns
        .iter()
        .filter(|col| !col.within(deviation_pct))
        .map(|col| col.index)
        .collect();

    let keep_indices: Vec<usize> = (0..table.n_columns())
        .filter(|i| !dropped.contains(i))
        .collect();

    table.subset_columns(&keep_indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> FeatureTable {
        // 2 features; QC totals 80, 100, 120, 200 (median 100)
        FeatureTable::new(
            vec!["100.0_1.0".into(), "200.0_2.0".into()],
            vec![
                "QC1".into(),
                "S1".into(),
                "QC2".into(),
                "QC3".into(),
                "Blank1".into(),
                "QC4".into(),
            ],
            vec![
                vec![Some(50.0), Some(1.0), Some(60.0), Some(70.0), Some(2.0), Some(150.0)],
                vec![Some(30.0), None, Some(40.0), Some(50.0), None, Some(50.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_drops_column_outside_band() {
        let table = create_test_table();
        let filtered = filter_qc_drift(&table, &PrefixSet::single("QC"), 25.0).unwrap();

        // 80%, 100%, 120% kept; 200% dropped
        assert_eq!(filtered.column_names(), &["QC1", "S1", "QC2", "QC3", "Blank1"]);
        assert_eq!(filtered.n_features(), 2);
        assert_eq!(filtered.row(0), &[Some(50.0), Some(1.0), Some(60.0), Some(70.0), Some(2.0)]);
    }

    #[test]
    fn test_narrow_band() {
        let table = create_test_table();
        let filtered = filter_qc_drift(&table, &PrefixSet::single("QC"), 10.0).unwrap();
        assert_eq!(filtered.column_names(), &["S1", "QC2", "Blank1"]);
    }

    #[test]
    fn test_even_qc_count_uses_lower_middle_total() {
        // totals 100, 100, 120, 120 -> median 100, so the 120% columns fall outside 100 ± 10%
        let table = FeatureTable::new(
            vec!["a".into()],
            vec!["QC1".into(), "QC2".into(), "QC3".into(), "QC4".into()],
            vec![vec![Some(100.0), Some(100.0), Some(120.0), Some(120.0)]],
        )
        .unwrap();
        let filtered = filter_qc_drift(&table, &PrefixSet::single("QC"), 10.0).unwrap();
        assert_eq!(filtered.column_names(), &["QC1", "QC2"]);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        // totals 75, 100, 125 -> exactly on the band edges
        let table = FeatureTable::new(
            vec!["a".into()],
            vec!["QC1".into(), "QC2".into(), "QC3".into()],
            vec![vec![Some(75.0), Some(100.0), Some(125.0)]],
        )
        .unwrap();
        let filtered = filter_qc_drift(&table, &PrefixSet::single("QC"), 25.0).unwrap();
        assert_eq!(filtered.n_columns(), 3);
    }

    #[test]
    fn test_zero_median_drops_all_qc_columns() {
        let table = FeatureTable::new(
            vec!["a".into()],
            vec!["QC1".into(), "QC2".into(), "QC3".into(), "S1".into()],
            vec![vec![None, Some(0.0), Some(5.0), Some(1.0)]],
        )
        .unwrap();
        let filtered = filter_qc_drift(&table, &PrefixSet::single("QC"), 25.0).unwrap();
        assert_eq!(filtered.column_names(), &["S1"]);
    }

    #[test]
    fn test_no_qc_columns_is_empty_group() {
        let table = FeatureTable::new(
            vec!["a".into()],
            vec!["S1".into()],
            vec![vec![Some(1.0)]],
        )
        .unwrap();
        let err = filter_qc_drift(&table, &PrefixSet::single("QC"), 25.0).unwrap_err();
        assert!(matches!(err, CleanError::EmptyGroup { .. }));
    }

    #[test]
    fn test_never_adds_columns() {
        let table = create_test_table();
        for dev in [0.0, 10.0, 25.0, 100.0, 1000.0] {
            let filtered = filter_qc_drift(&table, &PrefixSet::single("QC"), dev).unwrap();
            assert!(filtered.n_columns() <= table.n_columns());
            assert_eq!(filtered.n_features(), table.n_features());
        }
    }

    #[test]
    fn test_invalid_deviation() {
        let table = create_test_table();
        assert!(filter_qc_drift(&table, &PrefixSet::single("QC"), -1.0).is_err());
    }
}
