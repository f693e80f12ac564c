//! Filtering primitives for feature tables.
//!
//! Each filter is a pure function from a table to a new, smaller table.

pub mod blank_ratio;
pub mod duplicates;
pub mod qc_detection;
pub mod qc_drift;
pub mod qc_variability;
pub mod sample_presence;

pub use blank_ratio::filter_blank_ratio;
pub use duplicates::filter_duplicate_keys;
pub use qc_detection::filter_qc_detection;
pub use qc_drift::filter_qc_drift;
pub use qc_variability::filter_qc_variability;
pub use sample_presence::filter_sample_presence;
