//! Error types for the mx-cleaner library.

use crate::pipeline::PipelineStep;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum CleanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Missing column '{column}' ({role})")]
    MissingColumn { column: String, role: String },

    #[error("Empty group: no columns match the {group} prefix '{prefix}'")]
    EmptyGroup { group: String, prefix: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{step} failed: {source}")]
    Stage {
        step: PipelineStep,
        #[source]
        source: Box<CleanError>,
    },

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CleanError {
    /// Short name of the error kind, as shown to CLI users.
    pub fn kind(&self) -> &'static str {
        match self {
            CleanError::Io(_) => "IOError",
            CleanError::Csv(_)
            | CleanError::MalformedInput(_)
            | CleanError::DimensionMismatch { .. } => "MalformedInputError",
            CleanError::MissingColumn { .. } => "MissingColumnError",
            CleanError::EmptyGroup { .. } => "EmptyGroupError",
            CleanError::InvalidParameter(_) => "InvalidParameterError",
            CleanError::Stage { source, .. } => source.kind(),
            CleanError::Yaml(_) | CleanError::Json(_) => "SerializationError",
        }
    }

    /// Wrap this error with the pipeline step that raised it.
    pub fn in_step(self, step: PipelineStep) -> Self {
        CleanError::Stage {
            step,
            source: Box::new(self),
        }
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, CleanError>;
