// file: src/quality/filter.rs
// description: mandatory-field and salary-bound checks for survey rows
// reference: quality gate checkpoint between parsing and aggregation

use crate::config::AnalysisConfig;
use crate::error::RecordError;
use crate::models::{CanonicalRecord, RawResponse};

/// Outcome of the final gate. A rejection carries the error the row is counted under.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accept,
    Reject(RecordError),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityFilter {
    min_salary_usd: f64,
    max_salary_usd: f64,
}

impl QualityFilter {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            min_salary_usd: config.min_salary_usd,
            max_salary_usd: config.max_salary_usd,
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min_salary_usd, self.max_salary_usd)
    }

    /// Salary, currency and country must be present before anything is parsed.
    pub fn check_mandatory(&self, raw: &RawResponse) -> Result<(), RecordError> {
        if raw.salary.trim().is_empty() {
            return Err(RecordError::MissingMandatoryField("salary"));
        }
        if raw.currency.trim().is_empty() {
            return Err(RecordError::MissingMandatoryField("currency"));
        }
        if raw.country.trim().is_empty() {
            return Err(RecordError::MissingMandatoryField("country"));
        }
        Ok(())
    }

    /// Both bounds are inclusive.
    pub fn check_salary(&self, salary_usd: f64) -> Result<f64, RecordError> {
        if salary_usd.is_finite()
            && salary_usd >= self.min_salary_usd
            && salary_usd <= self.max_salary_usd
        {
            Ok(salary_usd)
        } else {
            Err(RecordError::OutlierSalary(salary_usd))
        }
    }

    /// Final gate for a fully built record, and the only place salary bounds are applied.
    /// The record is inspected, never modified.
    pub fn evaluate(&self, record: &CanonicalRecord) -> Verdict {
        if record.currency_original.trim().is_empty() {
            return Verdict::Reject(RecordError::MissingMandatoryField("currency"));
        }
        if record.country.trim().is_empty() {
            return Verdict::Reject(RecordError::MissingMandatoryField("country"));
        }
        match self.check_salary(record.salary_usd) {
            Ok(_) => Verdict::Accept,
            Err(err) => Verdict::Reject(err),
        }
    }
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self::new(&crate::config::Config::default_config().analysis)
    }
}
