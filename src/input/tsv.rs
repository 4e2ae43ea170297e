// file: src/input/tsv.rs
// description: reads a delimited survey export into a raw batch
// reference: csv reader with tab or comma delimiter chosen from the file extension

use crate::error::{PipelineError, Result};
use crate::models::RawBatch;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Field delimiter for a path: tab for `.tsv`/`.tab`, comma otherwise.
pub fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    }
}

pub fn read_batch(path: &Path) -> Result<RawBatch> {
    let file = File::open(path).map_err(|source| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source,
    })?;

    let delimiter = delimiter_for(path);
    debug!(
        "Reading {} with delimiter {:?}",
        path.display(),
        delimiter as char
    );

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(file);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for record in rdr.records() {
        let record = record?;
        records.push(record.iter().map(|field| field.to_string()).collect());
    }

    let batch = RawBatch::from_table(&headers, records)?;
    info!("Read {} rows from {}", batch.len(), path.display());
    Ok(batch)
}
