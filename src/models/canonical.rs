// file: src/models/canonical.rs
// description: normalized, typed survey record and its enumerations

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_STATE: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobCategory {
    Tech,
    NonTech,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Man,
    Woman,
    OtherOrUnknown,
}

/// Highest completed education. Variant order is the ranking used for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationLevel {
    HighSchool,
    Bachelor,
    Master,
    Doctorate,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Index of the originating row in the input batch.
    pub source_row: usize,
    pub salary_usd: f64,
    pub currency_original: String,
    pub country: String,
    pub state: String,
    pub job_title: String,
    pub job_category: JobCategory,
    pub tech_industry: bool,
    pub software_engineer: bool,
    pub industry: String,
    /// `None` when the experience text could not be parsed.
    pub experience_years: Option<f64>,
    pub gender: Gender,
    pub education_level: EducationLevel,
    pub submitted_at: Option<NaiveDateTime>,
}

impl CanonicalRecord {
    pub fn is_us(&self) -> bool {
        self.country == crate::parser::location::UNITED_STATES
    }

    pub fn is_tech(&self) -> bool {
        self.job_category == JobCategory::Tech
    }

    pub fn has_known_state(&self) -> bool {
        self.state != UNKNOWN_STATE
    }
}
