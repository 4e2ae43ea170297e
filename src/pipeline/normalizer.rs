// file: src/pipeline/normalizer.rs
// description: converts raw survey rows into canonical records
// reference: parses fields, classifies the role, and applies the quality filter per row

use crate::classifier::JobClassifier;
use crate::config::Config;
use crate::currency::CurrencyConverter;
use crate::error::{PipelineError, RecordError, Result};
use crate::models::{CanonicalRecord, RawBatch, RawResponse, UNKNOWN_STATE};
use crate::parser::{
    ExperienceParser, UNITED_STATES, parse_education, parse_gender, parse_salary,
    parse_timestamp, standardize, standardize_country,
};
use crate::quality::{DataQualitySummary, QualityFilter, Verdict};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Retained records of a batch, in input order, with the data-quality tally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBatch {
    pub records: Vec<CanonicalRecord>,
    pub summary: DataQualitySummary,
}

impl NormalizedBatch {
    /// Append a later, disjoint part of the same batch.
    pub fn extend(&mut self, other: NormalizedBatch) {
        self.records.extend(other.records);
        self.summary.merge(&other.summary);
    }
}

struct NormalizedRow {
    record: CanonicalRecord,
    classification_defaulted: bool,
}

/// Immutable per-run normalization state. Safe to share across worker threads.
pub struct NormalizationPipeline {
    converter: CurrencyConverter,
    classifier: JobClassifier,
    filter: QualityFilter,
    experience: ExperienceParser,
}

impl NormalizationPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            converter: CurrencyConverter::new(&config.currency),
            classifier: JobClassifier::new(&config.classification),
            filter: QualityFilter::new(&config.analysis),
            experience: ExperienceParser::new(config.analysis.open_ended_offset_years),
        }
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    pub fn normalize(&self, batch: &RawBatch) -> Result<NormalizedBatch> {
        if batch.is_empty() {
            return Err(PipelineError::EmptyBatch);
        }

        info!("Normalizing {} rows", batch.len());
        let normalized = self.normalize_rows(0, batch.rows());
        info!(
            "Normalization complete: {} retained, {} dropped",
            normalized.summary.rows_retained,
            normalized.summary.rows_dropped()
        );
        Ok(normalized)
    }

    /// Normalize a contiguous slice of a batch whose first row has index `offset`.
    pub fn normalize_rows(&self, offset: usize, rows: &[RawResponse]) -> NormalizedBatch {
        let mut out = NormalizedBatch::default();

        for (i, raw) in rows.iter().enumerate() {
            let source_row = offset + i;
            match self.build(source_row, raw) {
                Ok(row) => {
                    let record = &row.record;
                    out.summary.record_retained();
                    if record.experience_years.is_none() {
                        out.summary.experience_unresolved += 1;
                    }
                    if record.country == UNITED_STATES && record.state == UNKNOWN_STATE {
                        out.summary.state_unresolved += 1;
                    }
                    if row.classification_defaulted {
                        out.summary.classification_defaulted += 1;
                    }
                    out.records.push(row.record);
                }
                Err(err) => {
                    debug!("Row {} dropped: {}", source_row, err);
                    if let Some(reason) = err.rejection_reason() {
                        out.summary.record_dropped(reason);
                    }
                }
            }
        }

        out
    }

    /// Normalize a single row, returning the error that caused it to be dropped.
    pub fn normalize_row(
        &self,
        source_row: usize,
        raw: &RawResponse,
    ) -> std::result::Result<CanonicalRecord, RecordError> {
        self.build(source_row, raw).map(|row| row.record)
    }

    fn build(
        &self,
        source_row: usize,
        raw: &RawResponse,
    ) -> std::result::Result<NormalizedRow, RecordError> {
        self.filter.check_mandatory(raw)?;

        let currency = self.converter.resolve_code(&raw.currency, &raw.other_currency)?;
        let amount = parse_salary(&raw.salary)?;
        let salary_usd = self.converter.convert(amount, &currency)?;

        let country = standardize_country(&raw.country);
        let state = standardize(&raw.state, &country);
        let classification = self
            .classifier
            .classify_detailed(&raw.job_title, &raw.industry);

        let experience_years = match self.experience.parse(&raw.experience) {
            Ok(years) => Some(years),
            Err(err) => {
                debug!("Row {}: {}", source_row, err);
                None
            }
        };

        let record = CanonicalRecord {
            source_row,
            salary_usd,
            currency_original: currency,
            country,
            state,
            job_title: raw.job_title.trim().to_string(),
            job_category: classification.category,
            tech_industry: classification.tech_industry,
            software_engineer: classification.software_engineer,
            industry: raw.industry.trim().to_string(),
            experience_years,
            gender: parse_gender(&raw.gender),
            education_level: parse_education(&raw.education),
            submitted_at: parse_timestamp(&raw.timestamp),
        };

        match self.filter.evaluate(&record) {
            Verdict::Accept => Ok(NormalizedRow {
                record,
                classification_defaulted: classification.defaulted,
            }),
            Verdict::Reject(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RejectionReason;
    use crate::models::{EducationLevel, Gender, JobCategory};
    use pretty_assertions::assert_eq;

    fn raw(salary: &str, currency: &str, country: &str) -> RawResponse {
        RawResponse {
            salary: salary.to_string(),
            currency: currency.to_string(),
            country: country.to_string(),
            state: "California".to_string(),
            job_title: "Software Engineer".to_string(),
            industry: "Computing or Tech".to_string(),
            experience: "5-7 years".to_string(),
            gender: "Woman".to_string(),
            education: "Master's degree".to_string(),
            timestamp: "4/27/2021 11:02:10".to_string(),
            ..Default::default()
        }
    }

    fn pipeline() -> NormalizationPipeline {
        NormalizationPipeline::new(&Config::default_config())
    }

    #[test]
    fn test_full_row() {
        let record = pipeline()
            .normalize_row(7, &raw("$120,000", "USD", "United States"))
            .unwrap();

        assert_eq!(record.source_row, 7);
        assert_eq!(record.salary_usd, 120_000.0);
        assert_eq!(record.currency_original, "USD");
        assert_eq!(record.country, UNITED_STATES);
        assert_eq!(record.state, "CA");
        assert_eq!(record.job_category, JobCategory::Tech);
        assert!(record.software_engineer);
        assert_eq!(record.experience_years, Some(6.0));
        assert_eq!(record.gender, Gender::Woman);
        assert_eq!(record.education_level, EducationLevel::Master);
        assert!(record.submitted_at.is_some());
    }

    #[test]
    fn test_foreign_currency_converted() {
        let record = pipeline()
            .normalize_row(0, &raw("50,000", "GBP", "UK"))
            .unwrap();
        assert!((record.salary_usd - 69_000.0).abs() < 1e-6);
        assert_eq!(record.currency_original, "GBP");
        assert_eq!(record.country, "United Kingdom");
        assert_eq!(record.state, UNKNOWN_STATE);
    }

    #[test]
    fn test_rejections() {
        let p = pipeline();
        assert_eq!(
            p.normalize_row(0, &raw("", "USD", "US")),
            Err(RecordError::MissingMandatoryField("salary"))
        );
        assert_eq!(
            p.normalize_row(0, &raw("50000", "JPY", "Japan")),
            Err(RecordError::UnsupportedCurrency("JPY".to_string()))
        );
        assert!(matches!(
            p.normalize_row(0, &raw("lots", "USD", "US")),
            Err(RecordError::UnparseableSalary(_))
        ));
        assert_eq!(
            p.normalize_row(0, &raw("9,999", "USD", "US")),
            Err(RecordError::OutlierSalary(9_999.0))
        );
        assert_eq!(
            p.normalize_row(0, &raw("2,000,001", "USD", "US")),
            Err(RecordError::OutlierSalary(2_000_001.0))
        );
        assert_eq!(
            p.normalize_row(0, &raw("85000,5", "USD", "US")),
            Err(RecordError::UnparseableSalary("85000,5".to_string()))
        );
    }

    #[test]
    fn test_short_row_counts_missing_field() {
        let headers: Vec<String> = ["salary", "currency", "country", "job_title", "gender"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let cells = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        let batch = RawBatch::from_table(
            &headers,
            vec![
                cells(&["90000", "USD", "US", "Engineer"]),
                cells(&["90000", "USD"]),
            ],
        )
        .unwrap();

        let out = pipeline().normalize(&batch).unwrap();
        assert_eq!(out.summary.rows_in, 2);
        assert_eq!(out.summary.rows_retained, 1);
        assert_eq!(out.summary.dropped(RejectionReason::MissingMandatoryField), 1);
        assert_eq!(out.records[0].gender, Gender::OtherOrUnknown);
    }

    #[test]
    fn test_unparseable_experience_keeps_record() {
        let mut row = raw("90000", "USD", "US");
        row.experience = "forever".to_string();
        let batch = pipeline().normalize(&RawBatch::new(vec![row])).unwrap();

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].experience_years, None);
        assert_eq!(batch.summary.experience_unresolved, 1);
    }

    #[test]
    fn test_summary_tally() {
        let mut unknown_state = raw("80000", "USD", "US");
        unknown_state.state = "Somewhere".to_string();
        let mut defaulted = raw("70000", "USD", "US");
        defaulted.job_title = "Librarian".to_string();
        defaulted.industry = "Libraries".to_string();

        let batch = RawBatch::new(vec![
            raw("100000", "USD", "US"),
            raw("5000", "USD", "US"),
            raw("100000", "CHF", "Switzerland"),
            raw("100000", "USD", ""),
            unknown_state,
            defaulted,
        ]);
        let out = pipeline().normalize(&batch).unwrap();

        assert_eq!(out.summary.rows_in, 6);
        assert_eq!(out.summary.rows_retained, 3);
        assert_eq!(out.summary.dropped(RejectionReason::OutlierSalary), 1);
        assert_eq!(out.summary.dropped(RejectionReason::UnsupportedCurrency), 1);
        assert_eq!(out.summary.dropped(RejectionReason::MissingMandatoryField), 1);
        assert_eq!(out.summary.state_unresolved, 1);
        assert_eq!(out.summary.classification_defaulted, 1);
        assert_eq!(
            out.records.iter().map(|r| r.source_row).collect::<Vec<_>>(),
            vec![0, 4, 5]
        );
    }

    #[test]
    fn test_empty_batch_is_fatal() {
        let err = pipeline().normalize(&RawBatch::default()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyBatch));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let batch = RawBatch::new(vec![
            raw("100000", "USD", "US"),
            raw("85k", "CAD", "Canada"),
            raw("n/a", "USD", "US"),
        ]);
        let p = pipeline();
        assert_eq!(p.normalize(&batch).unwrap(), p.normalize(&batch).unwrap());
    }
}
