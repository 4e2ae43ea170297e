// file: src/exporter/mod.rs
// description: output adapters module exports
// reference: internal module structure

pub mod json;

pub use json::{ExportManifest, ExportedFile, JsonExporter};
