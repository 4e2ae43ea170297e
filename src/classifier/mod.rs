// file: src/classifier/mod.rs
// description: job classification module exports
// reference: internal module structure

pub mod job;

pub use job::{Classification, JobClassifier};
