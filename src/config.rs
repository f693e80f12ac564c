//! Cleaning configuration.
//!
//! All tunables of the pipeline live in one [`CleanerConfig`] value. Every
//! field has a default, and a configuration can be loaded from YAML:
//!
//! ```yaml
//! mass_col: Mass
//! rt_col: RT
//! sample_prefixes: "S, KO"
//! sample_prefix_mode: tokens
//! blank_prefix: Blank
//! qc_prefix: QC
//! deviation_pct: 25
//! detection_pct: 70
//! ratio_min: 5
//! cv_max_pct: 30
//! ```

use crate::data::{PrefixMode, PrefixSet};
use crate::error::{CleanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Configuration of the cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanerConfig {
    /// Name of the mass column.
    pub mass_col: String,
    /// Name of the retention-time column.
    pub rt_col: String,
    /// Sample prefixes, e.g. `"S"` or `"S, WT, KO"`.
    pub sample_prefixes: String,
    /// How `sample_prefixes` is split into prefixes.
    pub sample_prefix_mode: PrefixMode,
    /// Prefix of blank columns.
    pub blank_prefix: String,
    /// Prefix of QC columns.
    pub qc_prefix: String,
    /// Allowed deviation of a QC column total from the QC median, in percent.
    pub deviation_pct: f64,
    /// Share of QC columns a feature must be detected in, in percent (strict).
    pub detection_pct: f64,
    /// Minimum QC/blank mean ratio.
    pub ratio_min: f64,
    /// Maximum QC coefficient of variation, in percent.
    pub cv_max_pct: f64,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            mass_col: "Mass".to_string(),
            rt_col: "RT".to_string(),
            sample_prefixes: "S".to_string(),
            sample_prefix_mode: PrefixMode::Tokens,
            blank_prefix: "Blank".to_string(),
            qc_prefix: "QC".to_string(),
            deviation_pct: 25.0,
            detection_pct: 70.0,
            ratio_min: 5.0,
            cv_max_pct: 30.0,
        }
    }
}

impl CleanerConfig {
    /// QC column group.
    pub fn qc_group(&self) -> PrefixSet {
        PrefixSet::single(&self.qc_prefix)
    }

    /// Blank column group.
    pub fn blank_group(&self) -> PrefixSet {
        PrefixSet::single(&self.blank_prefix)
    }

    /// Experimental sample column group.
    pub fn sample_group(&self) -> PrefixSet {
        PrefixSet::parse(&self.sample_prefixes, self.sample_prefix_mode)
    }

    /// Check that names are non-empty and thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("mass_col", &self.mass_col),
            ("rt_col", &self.rt_col),
            ("blank_prefix", &self.blank_prefix),
            ("qc_prefix", &self.qc_prefix),
        ] {
            if value.is_empty() {
                return Err(CleanError::InvalidParameter(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }
        if self.mass_col == self.rt_col {
            return Err(CleanError::InvalidParameter(
                "mass_col and rt_col must name different columns".to_string(),
            ));
        }
        if self.sample_group().is_empty() {
            return Err(CleanError::InvalidParameter(format!(
                "sample_prefixes '{}' contains no prefix",
                self.sample_prefixes
            )));
        }
        for (field, value) in [
            ("deviation_pct", self.deviation_pct),
            ("detection_pct", self.detection_pct),
            ("ratio_min", self.ratio_min),
            ("cv_max_pct", self.cv_max_pct),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CleanError::InvalidParameter(format!(
                    "{} must be a non-negative number, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }

    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(CleanError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(CleanError::from)
    }

    /// Load from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

impl fmt::Display for CleanerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mass column name (default: \"Mass\"): {}", self.mass_col)?;
        writeln!(f, "RT column name (default: \"RT\"): {}", self.rt_col)?;
        writeln!(
            f,
            "Sample column prefix (default: \"S\"): {} ({} mode)",
            self.sample_prefixes, self.sample_prefix_mode
        )?;
        writeln!(f, "Blank column prefix (default: \"Blank\"): {}", self.blank_prefix)?;
        writeln!(f, "QC column prefix (default: \"QC\"): {}", self.qc_prefix)?;
        writeln!(f, "%Deviation in QC samples (default: 25): {}", self.deviation_pct)?;
        writeln!(f, "%Detected in QC samples (default: 70): {}", self.detection_pct)?;
        writeln!(f, "QC/Blank ratio (default: 5): {}", self.ratio_min)?;
        writeln!(f, "%CV in QC samples (default: 30): {}", self.cv_max_pct)?;
        Ok(())
    }
}
