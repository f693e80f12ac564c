//! Pipeline composition and execution for feature-table cleaning.

mod report;
mod runner;

pub use report::{CleaningReport, StageReport};
pub use runner::{clean_file, clean_file_with_report, CleanedTable, Pipeline, PipelineStep};
