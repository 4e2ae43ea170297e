// file: src/input/mod.rs
// description: input adapters module exports
// reference: internal module structure

pub mod tsv;

pub use tsv::read_batch;
