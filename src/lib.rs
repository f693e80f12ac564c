//! Quality Filtering for Metabolomics Feature Tables
//!
//! This library cleans feature-intensity tables produced by LC-MS
//! metabolomics pipelines. Each row is a feature (mass × retention time),
//! each column a sample; QC replicates, blanks and experimental samples are
//! told apart by column-name prefix.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (RawTable, FeatureTable, PrefixSet)
//! - **load**: Feature-key synthesis from mass and RT columns
//! - **profile**: QC drift and per-feature QC/blank statistics
//! - **filter**: The six cleaning filters
//! - **export**: Helper-column removal and CSV output
//! - **pipeline**: Composition of the steps and run reports
//! - **config**: Pipeline configuration
//!
//! The filters run in a fixed order:
//!
//! 1. QC drift: drop QC columns whose total is outside 100 ± 25% of the QC median
//! 2. QC detection: drop features detected in ≤ 70% of QC columns
//! 3. Sample presence: drop features absent from every sample column
//! 4. Duplicate keys: keep the first feature for every key
//! 5. QC/blank ratio: drop features with QC mean / blank mean < 5
//! 6. QC variability: drop features with a QC CV > 30%
//!
//! # Example
//!
//! ```no_run
//! use mx_cleaner::prelude::*;
//!
//! let raw = RawTable::from_csv("input.csv").unwrap();
//! let cleaned = Pipeline::new(CleanerConfig::default())
//!     .unwrap()
//!     .run(&raw)
//!     .unwrap();
//!
//! println!("{}", cleaned.report);
//! write_atomic(&cleaned.table, cleaned_path("input.csv")).unwrap();
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod filter;
pub mod load;
pub mod pipeline;
pub mod profile;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::CleanerConfig;
    pub use crate::data::{FeatureTable, PrefixMode, PrefixSet, RawTable, FEATURE_KEY_COLUMN};
    pub use crate::error::{CleanError, Result};
    pub use crate::export::{cleaned_path, finalize, write_atomic, write_csv};
    pub use crate::filter::{
        filter_blank_ratio, filter_duplicate_keys, filter_qc_detection, filter_qc_drift,
        filter_qc_variability, filter_sample_presence,
    };
    pub use crate::load::{feature_key, normalize};
    pub use crate::pipeline::{
        clean_file, clean_file_with_report, CleanedTable, CleaningReport, Pipeline,
        PipelineStep, StageReport,
    };
    pub use crate::profile::{
        profile_metrics, profile_qc_drift, FeatureMetrics, QcDriftProfile,
    };
}
