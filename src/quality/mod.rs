// file: src/quality/mod.rs
// description: record quality checks and data-quality reporting
// reference: internal module structure

pub mod filter;
pub mod summary;

pub use filter::{QualityFilter, Verdict};
pub use summary::DataQualitySummary;
