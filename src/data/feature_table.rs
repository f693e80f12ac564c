//! Feature-intensity table keyed by synthesized feature identifiers.

use crate::data::PrefixSet;
use crate::error::{CleanError, Result};
use std::collections::HashSet;

/// Name of the synthesized feature-key column.
pub const FEATURE_KEY_COLUMN: &str = "mass_Rt";

/// A dense table of intensities with missing values.
///
/// Rows represent features (identified by their feature key), columns
/// represent samples (QC, blank, experimental, or anything else).
/// Values are stored row-major since every filter works row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    /// Feature key per row
    feature_keys: Vec<String>,
    /// Column names, excluding the feature-key column
    columns: Vec<String>,
    /// Intensities (features × columns)
    rows: Vec<Vec<Option<f64>>>,
}

impl FeatureTable {
    /// Create a new FeatureTable from keys, column names, and row values.
    pub fn new(
        feature_keys: Vec<String>,
        columns: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        if rows.len() != feature_keys.len() {
            return Err(CleanError::DimensionMismatch {
                expected: feature_keys.len(),
                actual: rows.len(),
            });
        }
        if let Some(row) = rows.iter().find(|r| r.len() != columns.len()) {
            return Err(CleanError::DimensionMismatch {
                expected: columns.len(),
                actual: row.len(),
            });
        }
        let mut seen = HashSet::new();
        for name in &columns {
            if name == FEATURE_KEY_COLUMN {
                return Err(CleanError::MalformedInput(format!(
                    "column name '{}' is reserved for the feature key",
                    FEATURE_KEY_COLUMN
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(CleanError::MalformedInput(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }
        Ok(Self {
            feature_keys,
            columns,
            rows,
        })
    }

    /// Get the value at (row, col), `None` for a missing reading.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows[row][col]
    }

    /// Number of features (rows).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.feature_keys.len()
    }

    /// Number of value columns, not counting the feature-key column.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns) including the feature-key column.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_features(), self.n_columns() + 1)
    }

    /// Feature keys in row order.
    #[inline]
    pub fn feature_keys(&self) -> &[String] {
        &self.feature_keys
    }

    /// Column names in table order.
    #[inline]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// All values of one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[Option<f64>] {
        &self.rows[row]
    }

    /// Position of a named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Indices of the columns belonging to a prefix group, in table order.
    pub fn columns_matching(&self, group: &PrefixSet) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, name)| group.matches(name))
            .map(|(i, _)| i)
            .collect()
    }

    /// Non-missing values of a row restricted to the given columns.
    pub fn present_values(&self, row: usize, cols: &[usize]) -> Vec<f64> {
        let values = &self.rows[row];
        cols.iter().filter_map(|&c| values[c]).collect()
    }

    /// Number of non-missing values of a row among the given columns.
    pub fn count_present(&self, row: usize, cols: &[usize]) -> usize {
        let values = &self.rows[row];
        cols.iter().filter(|&&c| values[c].is_some()).count()
    }

    /// Sum of a column; missing values count as zero.
    pub fn col_sum(&self, col: usize) -> f64 {
        self.rows.iter().filter_map(|r| r[col]).sum()
    }

    /// Subset the table to include only specified features (by index).
    pub fn subset_features(&self, indices: &[usize]) -> Result<Self> {
        let mut keys = Vec::with_capacity(indices.len());
        let mut rows = Vec::with_capacity(indices.len());
        for &old_row in indices {
            if old_row >= self.n_features() {
                return Err(CleanError::InvalidParameter(format!(
                    "Feature index {} out of bounds",
                    old_row
                )));
            }
            keys.push(self.feature_keys[old_row].clone());
            rows.push(self.rows[old_row].clone());
        }
        Self::new(keys, self.columns.clone(), rows)
    }

    /// Subset the table to include only specified columns (by index).
    pub fn subset_columns(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.n_columns()) {
            return Err(CleanError::InvalidParameter(format!(
                "Column index {} out of bounds",
                bad
            )));
        }
        let columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|r| indices.iter().map(|&i| r[i]).collect())
            .collect();
        Self::new(self.feature_keys.clone(), columns, rows)
    }

    /// Keep the rows for which `keep` returns true, preserving order.
    pub fn retain_features<F>(&self, mut keep: F) -> Result<Self>
    where
        F: FnMut(usize) -> bool,
    {
        let indices: Vec<usize> = (0..self.n_features()).filter(|&row| keep(row)).collect();
        self.subset_features(&indices)
    }
}
