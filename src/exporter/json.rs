// file: src/exporter/json.rs
// description: json export of insight reports and canonical records

use crate::error::{PipelineError, Result};
use crate::insights::InsightReport;
use crate::models::CanonicalRecord;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_FILE: &str = "insights.json";
pub const RECORDS_FILE: &str = "canonical_records.json";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
    pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedFile {
    pub name: String,
    pub bytes: usize,
    /// Hex SHA-256 of the written content.
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub reference_year: u16,
    pub total_records: usize,
    pub files: Vec<ExportedFile>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>, pretty: bool) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| PipelineError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir, pretty })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn export_report(&self, report: &InsightReport) -> Result<ExportedFile> {
        self.write_json(REPORT_FILE, report)
    }

    pub fn export_records(&self, records: &[CanonicalRecord]) -> Result<ExportedFile> {
        self.write_json(RECORDS_FILE, &records)
    }

    /// Write the report, the records, and a manifest describing both.
    pub fn export_all(
        &self,
        report: &InsightReport,
        records: &[CanonicalRecord],
    ) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let files = vec![self.export_report(report)?, self.export_records(records)?];
        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            reference_year: report.reference_year,
            total_records: records.len(),
            files,
        };
        self.write_json(MANIFEST_FILE, &manifest)?;

        info!(
            "Export complete: {} records, {} files",
            manifest.total_records,
            manifest.files.len() + 1
        );
        Ok(manifest)
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<ExportedFile> {
        let content = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let path = self.output_dir.join(name);
        fs::write(&path, &content).map_err(|source| PipelineError::FileOperation {
            path: path.clone(),
            source,
        })?;

        Ok(ExportedFile {
            name: name.to_string(),
            bytes: content.len(),
            sha256: content_hash(&content),
        })
    }
}

pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::insights::InsightFormatter;
    use crate::models::{RawBatch, RawResponse};
    use crate::pipeline::NormalizationPipeline;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn normalized() -> (InsightReport, Vec<CanonicalRecord>) {
        let config = Config::default_config();
        let batch = RawBatch::new(vec![RawResponse {
            salary: "95,000".to_string(),
            currency: "USD".to_string(),
            country: "US".to_string(),
            state: "Oregon".to_string(),
            job_title: "Software Engineer".to_string(),
            industry: "Computing or Tech".to_string(),
            ..Default::default()
        }]);
        let normalized = NormalizationPipeline::new(&config).normalize(&batch).unwrap();
        let report = InsightFormatter::new(&config).format(&normalized);
        (report, normalized.records)
    }

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().join("out"), false);
        assert!(exporter.is_ok());
        assert!(dir.path().join("out").is_dir());
    }

    #[test]
    fn test_export_all_writes_files() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path(), true).unwrap();
        let (report, records) = normalized();

        let manifest = exporter.export_all(&report, &records).unwrap();
        assert_eq!(manifest.total_records, 1);
        assert_eq!(manifest.reference_year, 2021);
        assert_eq!(
            manifest.files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec![REPORT_FILE, RECORDS_FILE]
        );

        let written = fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
        assert_eq!(content_hash(&written), manifest.files[0].sha256);

        let back: InsightReport = serde_json::from_str(&written).unwrap();
        assert_eq!(back, report);

        let records_back: Vec<CanonicalRecord> =
            serde_json::from_str(&fs::read_to_string(dir.path().join(RECORDS_FILE)).unwrap())
                .unwrap();
        assert_eq!(records_back[0].state, "OR");
        assert!(dir.path().join(MANIFEST_FILE).is_file());
    }

    #[test]
    fn test_same_input_same_digest() {
        let dir_a = tempdir().unwrap();
        let dir_b = tempdir().unwrap();
        let (_, records) = normalized();

        let a = JsonExporter::new(dir_a.path(), false)
            .unwrap()
            .export_records(&records)
            .unwrap();
        let b = JsonExporter::new(dir_b.path(), false)
            .unwrap()
            .export_records(&records)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_hash_known_value() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
