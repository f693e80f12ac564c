//! Sample presence filtering: drop features absent from every sample column.

use crate::data::{FeatureTable, PrefixSet};
use crate::error::Result;

/// Keep features with at least one non-missing value across sample columns.
///
/// A table without sample columns loses every feature.
pub fn filter_sample_presence(table: &FeatureTable, samples: &PrefixSet) -> Result<FeatureTable> {
    let sample_cols = table.columns_matching(samples);
    table.retain_features(|row| table.count_present(row, &sample_cols) >= 1)
}
