//! Total-intensity drift of QC columns relative to the QC median.

use crate::data::{FeatureTable, PrefixSet};
use crate::profile::metrics::median;

/// Total intensity of one QC column and its share of the QC median.
#[derive(Debug, Clone, PartialEq)]
pub struct QcColumnDrift {
    /// Column name.
    pub column: String,
    /// Column index in the profiled table.
    pub index: usize,
    /// Sum of the column (missing values ignored).
    pub total: f64,
    /// `total / median × 100`; not finite when the median is zero.
    pub percent_of_median: f64,
}

impl QcColumnDrift {
    /// Whether the column total lies within `100 ± deviation_pct` percent.
    pub fn within(&self, deviation_pct: f64) -> bool {
        self.percent_of_median >= 100.0 - deviation_pct
            && self.percent_of_median <= 100.0 + deviation_pct
    }
}

/// Drift profile of all QC columns of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct QcDriftProfile {
    /// Median of the QC column totals; `None` without QC columns.
    pub median_total: Option<f64>,
    /// One entry per QC column, in table order.
    pub columns: Vec<QcColumnDrift>,
}

impl std::fmt::Display for QcDriftProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "QC Drift Profile")?;
        match self.median_total {
            Some(m) => writeln!(f, "  Median total: {}", m)?,
            None => writeln!(f, "  Median total: n/a")?,
        }
        for col in &self.columns {
            writeln!(
                f,
                "  {:<16} total {:>14.2}  {:>7.1}% of median",
                col.column, col.total, col.percent_of_median
            )?;
        }
        Ok(())
    }
}

/// Compute column totals and percent-of-median for every QC column.
pub fn profile_qc_drift(table: &FeatureTable, qc: &PrefixSet) -> QcDriftProfile {
    let indices = table.columns_matching(qc);
    let totals: Vec<f64> = indices.iter().map(|&i| table.col_sum(i)).collect();
    let median_total = median(&totals);

    let columns = indices
        .iter()
        .zip(&totals)
        .map(|(&index, &total)| QcColumnDrift {
            column: table.column_names()[index].clone(),
            index,
            total,
            percent_of_median: median_total.map_or(f64::NAN, |m| total / m * 100.0),
        })
        .collect();

    QcDriftProfile {
        median_total,
        columns,
    }
}
