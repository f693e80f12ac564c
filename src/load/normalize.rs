//! Feature-key synthesis and conversion of raw tables to feature tables.

use crate::config::CleanerConfig;
use crate::data::{is_missing_token, parse_cell, FeatureTable, RawTable};
use crate::error::{CleanError, Result};

/// Canonical text of a mass or retention-time cell.
///
/// Numbers are rendered as the shortest decimal that round-trips to the same
/// `f64`, always with a fractional part (`100` → `100.0`, `123.4560` →
/// `123.456`). Missing cells become `nan`. Anything else is kept verbatim
/// (trimmed).
pub fn canonical_text(cell: &str) -> String {
    let cell = cell.trim();
    if is_missing_token(cell) {
        return "nan".to_string();
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_nan() => "nan".to_string(),
        Ok(v) => format!("{:?}", v),
        Err(_) => cell.to_string(),
    }
}

/// Feature key of a (mass, retention time) pair: `<mass>_<rt>`.
pub fn feature_key(mass: &str, rt: &str) -> String {
    format!("{}_{}", canonical_text(mass), canonical_text(rt))
}

/// Replace the mass and RT columns of a raw table with a feature key.
///
/// All remaining columns keep their order and are parsed as intensities.
///
/// # Errors
/// * `MissingColumn` if the mass or RT column is absent
/// * `MalformedInput` for an intensity cell that is neither numeric nor missing
pub fn normalize(raw: &RawTable, config: &CleanerConfig) -> Result<FeatureTable> {
    let mass_idx = raw
        .column_index(&config.mass_col)
        .ok_or_else(|| CleanError::MissingColumn {
            column: config.mass_col.clone(),
            role: "mass column".to_string(),
        })?;
    let rt_idx = raw
        .column_index(&config.rt_col)
        .ok_or_else(|| CleanError::MissingColumn {
            column: config.rt_col.clone(),
            role: "retention time column".to_string(),
        })?;

    let value_cols: Vec<usize> = (0..raw.n_columns())
        .filter(|&i| i != mass_idx && i != rt_idx)
        .collect();
    let columns: Vec<String> = value_cols
        .iter()
        .map(|&i| raw.headers()[i].clone())
        .collect();

    let mut keys = Vec::with_capacity(raw.n_rows());
    let mut rows = Vec::with_capacity(raw.n_rows());

    for (row_idx, record) in raw.records().iter().enumerate() {
        keys.push(feature_key(&record[mass_idx], &record[rt_idx]));

        let mut values = Vec::with_capacity(value_cols.len());
        for &col in &value_cols {
            let cell = &record[col];
            let value = parse_cell(cell).map_err(|_| {
                CleanError::MalformedInput(format!(
                    "non-numeric value '{}' at row {}, column '{}'",
                    cell,
                    row_idx + 1,
                    raw.headers()[col]
                ))
            })?;
            values.push(value);
        }
        rows.push(values);
    }

    FeatureTable::new(keys, columns, rows)
}
