//! Duplicate feature-key filtering.

use crate::data::FeatureTable;
use crate::error::Result;
use std::collections::HashSet;

/// Keep the first row for every feature key; later repeats are removed.
///
/// Keys are compared byte for byte.
pub fn filter_duplicate_keys(table: &FeatureTable) -> Result<FeatureTable> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(table.n_features());
    let keys = table.feature_keys();
    table.retain_features(|row| seen.insert(keys[row].as_str()))
}
