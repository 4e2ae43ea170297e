// file: src/aggregation/mod.rs
// description: aggregation module exports
// reference: internal module structure

pub mod engine;
pub mod stats;

pub use engine::AggregationEngine;
