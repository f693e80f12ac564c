//! Pipeline runner executing the fixed sequence of cleaning steps.

use crate::config::CleanerConfig;
use crate::data::{FeatureTable, RawTable};
use crate::error::{CleanError, Result};
use crate::export::{cleaned_path, finalize, write_atomic};
use crate::filter::{
    filter_blank_ratio, filter_duplicate_keys, filter_qc_detection, filter_qc_drift,
    filter_qc_variability, filter_sample_presence,
};
use crate::load::normalize;
use crate::pipeline::{CleaningReport, StageReport};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A step of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStep {
    /// Build feature keys from mass and RT, drop the raw columns.
    Normalize,
    /// Remove QC columns whose total drifts from the QC median.
    QcDrift,
    /// Remove features detected in too few QC columns.
    QcDetection,
    /// Remove features absent from every sample column.
    SamplePresence,
    /// Remove repeated feature keys.
    DuplicateKeys,
    /// Remove features with a low QC/blank ratio.
    BlankRatio,
    /// Remove features with a high QC coefficient of variation.
    QcVariability,
    /// Drop helper columns and write the output.
    Export,
}

impl PipelineStep {
    /// The filtering steps, in execution order.
    pub const FILTERS: [PipelineStep; 6] = [
        PipelineStep::QcDrift,
        PipelineStep::QcDetection,
        PipelineStep::SamplePresence,
        PipelineStep::DuplicateKeys,
        PipelineStep::BlankRatio,
        PipelineStep::QcVariability,
    ];
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStep::Normalize => "Feature key normalization",
            PipelineStep::QcDrift => "QC drift filter",
            PipelineStep::QcDetection => "QC detection filter",
            PipelineStep::SamplePresence => "Sample presence filter",
            PipelineStep::DuplicateKeys => "Duplicate key filter",
            PipelineStep::BlankRatio => "QC/blank ratio filter",
            PipelineStep::QcVariability => "QC variability filter",
            PipelineStep::Export => "Export",
        };
        write!(f, "{}", name)
    }
}

/// Output of a pipeline run: the cleaned table and what happened to it.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    /// Cleaned table, helper columns removed.
    pub table: FeatureTable,
    /// Per-step summary.
    pub report: CleaningReport,
}

/// The cleaning pipeline for one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: CleanerConfig,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            config: CleanerConfig::default(),
        }
    }
}

impl Pipeline {
    /// Create a pipeline, validating the configuration.
    pub fn new(config: CleanerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The effective configuration.
    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Apply a single filtering step.
    ///
    /// `Normalize` and `Export` are not table-to-table filters and are handled
    /// by [`Pipeline::run`].
    pub fn apply(&self, step: PipelineStep, table: &FeatureTable) -> Result<FeatureTable> {
        let config = &self.config;
        match step {
            PipelineStep::QcDrift => {
                filter_qc_drift(table, &config.qc_group(), config.deviation_pct)
            }
            PipelineStep::QcDetection => {
                filter_qc_detection(table, &config.qc_group(), config.detection_pct)
            }
            PipelineStep::SamplePresence => filter_sample_presence(table, &config.sample_group()),
            PipelineStep::DuplicateKeys => filter_duplicate_keys(table),
            PipelineStep::BlankRatio => filter_blank_ratio(
                table,
                &config.qc_group(),
                &config.blank_group(),
                config.ratio_min,
            ),
            PipelineStep::QcVariability => {
                filter_qc_variability(table, &config.qc_group(), config.cv_max_pct)
            }
            PipelineStep::Normalize | PipelineStep::Export => Err(CleanError::InvalidParameter(
                format!("{} is not a filtering step", step),
            )),
        }
    }

    /// Check that the groups the filters rely on can be resolved.
    fn check_groups(&self, table: &FeatureTable) -> Result<()> {
        let samples = self.config.sample_group();
        if table.columns_matching(&samples).is_empty() {
            return Err(CleanError::MissingColumn {
                column: samples.to_string(),
                role: "sample group prefix".to_string(),
            }
            .in_step(PipelineStep::SamplePresence));
        }
        if table.columns_matching(&self.config.blank_group()).is_empty() {
            warn!(
                "No columns match the blank prefix '{}'; QC/blank ratios will be missing",
                self.config.blank_prefix
            );
        }
        Ok(())
    }

    /// Run the six filters in order on an already keyed table.
    ///
    /// Returns the filtered table (helper columns still present) and one
    /// report per filter.
    pub fn filter(&self, table: &FeatureTable) -> Result<(FeatureTable, Vec<StageReport>)> {
        self.check_groups(table)?;

        let mut current = table.clone();
        let mut stages = Vec::with_capacity(PipelineStep::FILTERS.len());

        for step in PipelineStep::FILTERS {
            let next = self.apply(step, &current).map_err(|e| e.in_step(step))?;
            let stage = StageReport::between(step, &current, &next);
            info!(
                "{}: {} -> {} features, {} -> {} columns",
                step, stage.rows_before, stage.rows_after, stage.columns_before, stage.columns_after
            );
            if stage.rows_after == 0 && stage.rows_before > 0 {
                warn!("{} removed every remaining feature", step);
            }
            stages.push(stage);
            current = next;
        }

        Ok((current, stages))
    }

    /// Run the full pipeline on a raw table: normalize, filter, finalize.
    pub fn run(&self, raw: &RawTable) -> Result<CleanedTable> {
        let original_shape = raw.shape();
        info!("Original dataset: {:?}", original_shape);

        let table = normalize(raw, &self.config).map_err(|e| e.in_step(PipelineStep::Normalize))?;
        let (filtered, stages) = self.filter(&table)?;
        let table = finalize(&filtered, &self.config.blank_group())
            .map_err(|e| e.in_step(PipelineStep::Export))?;

        let report = CleaningReport {
            original_shape,
            cleaned_shape: table.shape(),
            stages,
        };
        info!("Cleaned dataset: {:?}", report.cleaned_shape);

        Ok(CleanedTable { table, report })
    }
}

/// Clean a CSV file and write the result.
///
/// The output goes to `output`, or next to the input with a `_cleaned` suffix.
/// Nothing is written unless every step succeeds.
///
/// # Returns
/// The output path and the run report.
pub fn clean_file<P: AsRef<Path>>(
    input: P,
    output: Option<&Path>,
    config: &CleanerConfig,
) -> Result<(PathBuf, CleaningReport)> {
    clean_file_with_report(input, output, None, config)
}

/// Clean a CSV file, writing the cleaned table and optionally a JSON report.
///
/// The report is written before the table is persisted and removed again if
/// the table cannot be written, so either both files appear or neither does.
pub fn clean_file_with_report<P: AsRef<Path>>(
    input: P,
    output: Option<&Path>,
    report_path: Option<&Path>,
    config: &CleanerConfig,
) -> Result<(PathBuf, CleaningReport)> {
    let input = input.as_ref();
    let pipeline = Pipeline::new(config.clone())?;

    let raw = RawTable::from_csv(input)?;
    let cleaned = pipeline.run(&raw)?;

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cleaned_path(input));

    if let Some(path) = report_path {
        cleaned
            .report
            .write_json(path)
            .map_err(|e| e.in_step(PipelineStep::Export))?;
        info!("Wrote report {}", path.display());
    }

    if let Err(e) = write_atomic(&cleaned.table, &output_path) {
        if let Some(path) = report_path {
            if let Err(remove_err) = std::fs::remove_file(path) {
                warn!("Could not remove report {}: {}", path.display(), remove_err);
            }
        }
        return Err(e.in_step(PipelineStep::Export));
    }
    info!("Wrote {}", output_path.display());

    Ok((output_path, cleaned.report))
}
