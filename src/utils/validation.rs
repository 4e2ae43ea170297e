// file: src/utils/validation.rs
// description: input validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::Path;

/// Upper bound on worker tasks accepted from the command line.
pub const MAX_WORKERS: usize = 256;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            PipelineError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(PipelineError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_delimited_extension(path: &Path) -> Result<()> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("tsv") | Some("tab") | Some("csv") | Some("txt") => Ok(()),
            _ => Err(PipelineError::Validation(format!(
                "File is not a delimited text file (.tsv, .csv): {}",
                path.display()
            ))),
        }
    }

    /// Validate an input file before reading it.
    pub fn validate_input(path: &Path) -> Result<()> {
        Self::validate_delimited_extension(path)?;
        Self::validate_file_path(path)
    }

    pub fn validate_output_dir(path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Output path exists and is not a directory: {}",
                path.display()
            )));
        }
        Ok(())
    }

    pub fn validate_worker_count(workers: usize) -> Result<()> {
        if workers == 0 {
            return Err(PipelineError::Validation(
                "Worker count must be greater than 0".to_string(),
            ));
        }

        if workers > MAX_WORKERS {
            return Err(PipelineError::Validation(format!(
                "Worker count too large (max {})",
                MAX_WORKERS
            )));
        }

        Ok(())
    }
}
