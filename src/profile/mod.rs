//! Profiling of QC columns and per-feature statistics.

pub mod drift;
pub mod metrics;

pub use drift::{profile_qc_drift, QcColumnDrift, QcDriftProfile};
pub use metrics::{profile_metrics, FeatureMetrics};
