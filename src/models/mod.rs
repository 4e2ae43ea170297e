// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod aggregate;
pub mod canonical;
pub mod raw_response;

pub use aggregate::{AggregateResult, ConfidenceTier, Metric};
pub use canonical::{CanonicalRecord, EducationLevel, Gender, JobCategory, UNKNOWN_STATE};
pub use raw_response::{Column, RawBatch, RawResponse};
