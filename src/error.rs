// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Structural failures that abort a batch run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Batch contains no rows")]
    EmptyBatch,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Delimited input error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Worker task failed: {0}")]
    Worker(String),
}

/// Per-record failures. These never abort a batch: the row is dropped or the field is
/// left unresolved, and the occurrence is tallied in the data-quality summary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Unparseable salary: {0:?}")]
    UnparseableSalary(String),

    #[error("Unparseable experience: {0:?}")]
    UnparseableExperience(String),

    #[error("Missing mandatory field: {0}")]
    MissingMandatoryField(&'static str),

    #[error("Salary {0} outside accepted bounds")]
    OutlierSalary(f64),
}

impl RecordError {
    /// The tally bucket this error falls into, if it causes the row to be dropped.
    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        match self {
            RecordError::UnsupportedCurrency(_) => Some(RejectionReason::UnsupportedCurrency),
            RecordError::UnparseableSalary(_) => Some(RejectionReason::UnparseableSalary),
            RecordError::MissingMandatoryField(_) => Some(RejectionReason::MissingMandatoryField),
            RecordError::OutlierSalary(_) => Some(RejectionReason::OutlierSalary),
            RecordError::UnparseableExperience(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    MissingMandatoryField,
    UnsupportedCurrency,
    UnparseableSalary,
    OutlierSalary,
}

impl RejectionReason {
    pub const ALL: [RejectionReason; 4] = [
        RejectionReason::MissingMandatoryField,
        RejectionReason::UnsupportedCurrency,
        RejectionReason::UnparseableSalary,
        RejectionReason::OutlierSalary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::MissingMandatoryField => "MissingMandatoryField",
            RejectionReason::UnsupportedCurrency => "UnsupportedCurrency",
            RejectionReason::UnparseableSalary => "UnparseableSalary",
            RejectionReason::OutlierSalary => "OutlierSalary",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
