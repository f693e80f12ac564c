//! Summaries of what each pipeline step removed.

use crate::data::FeatureTable;
use crate::error::{CleanError, Result};
use crate::pipeline::PipelineStep;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rows and columns before and after one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    /// The step that ran.
    pub step: PipelineStep,
    /// Number of features before the step.
    pub rows_before: usize,
    /// Number of features after the step.
    pub rows_after: usize,
    /// Number of columns (including the feature key) before the step.
    pub columns_before: usize,
    /// Number of columns (including the feature key) after the step.
    pub columns_after: usize,
    /// Names of the columns the step removed.
    pub removed_columns: Vec<String>,
}

impl StageReport {
    /// Compare the tables before and after a step.
    pub fn between(step: PipelineStep, before: &FeatureTable, after: &FeatureTable) -> Self {
        let removed_columns = before
            .column_names()
            .iter()
            .filter(|name| after.column_index(name).is_none())
            .cloned()
            .collect();
        let (rows_before, columns_before) = before.shape();
        let (rows_after, columns_after) = after.shape();
        Self {
            step,
            rows_before,
            rows_after,
            columns_before,
            columns_after,
            removed_columns,
        }
    }

    /// Number of features removed.
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Summary of a complete cleaning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// (rows, columns) of the input as read, mass and RT columns included.
    pub original_shape: (usize, usize),
    /// (rows, columns) of the cleaned output, feature-key column included.
    pub cleaned_shape: (usize, usize),
    /// One entry per step, in execution order.
    pub stages: Vec<StageReport>,
}

impl CleaningReport {
    /// Save as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(CleanError::from)
    }

    /// Write the JSON report to a file.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl std::fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Cleaning Report")?;
        writeln!(f, "  Original: {:?}", self.original_shape)?;
        for stage in &self.stages {
            write!(
                f,
                "  {:<28} {:>7} -> {:>7} features",
                stage.step.to_string(),
                stage.rows_before,
                stage.rows_after
            )?;
            if !stage.removed_columns.is_empty() {
                write!(f, "  (removed {})", stage.removed_columns.join(", "))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  Cleaned:  {:?}", self.cleaned_shape)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between() {
        let before = FeatureTable::new(
            vec!["a".into(), "b".into()],
            vec!["QC1".into(), "QC2".into()],
            vec![vec![Some(1.0), Some(2.0)], vec![None, Some(3.0)]],
        )
        .unwrap();
        let after = before.subset_columns(&[1]).unwrap().subset_features(&[0]).unwrap();

        let stage = StageReport::between(PipelineStep::QcDrift, &before, &after);
        assert_eq!(stage.rows_before, 2);
        assert_eq!(stage.rows_after, 1);
        assert_eq!(stage.rows_removed(), 1);
        assert_eq!(stage.columns_before, 3);
        assert_eq!(stage.columns_after, 2);
        assert_eq!(stage.removed_columns, vec!["QC1"]);
    }

    #[test]
    fn test_json_and_display() {
        let report = CleaningReport {
            original_shape: (3, 6),
            cleaned_shape: (1, 4),
            stages: vec![StageReport {
                step: PipelineStep::DuplicateKeys,
                rows_before: 3,
                rows_after: 1,
                columns_before: 5,
                columns_after: 5,
                removed_columns: vec![],
            }],
        };

        let json = report.to_json().unwrap();
        assert!(json.contains("\"DuplicateKeys\""));
        let parsed: CleaningReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);

        let text = report.to_string();
        assert!(text.contains("Duplicate key filter"));
        assert!(text.contains("(1, 4)"));
    }
}
