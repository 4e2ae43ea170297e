// file: src/parser/demographics.rs
// description: gender, education and submission timestamp normalization

use crate::models::{EducationLevel, Gender};
use chrono::{DateTime, NaiveDateTime};

const TIMESTAMP_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M"];

pub fn parse_gender(text: &str) -> Gender {
    match text.trim().to_lowercase().as_str() {
        "man" | "men" | "male" | "m" => Gender::Man,
        "woman" | "women" | "female" | "f" => Gender::Woman,
        _ => Gender::OtherOrUnknown,
    }
}

/// Maps the survey's education answers onto the ordered levels. "Some college" counts as
/// high school; professional degrees (MD, JD) count as doctorate.
pub fn parse_education(text: &str) -> EducationLevel {
    let lower = text.trim().to_lowercase();

    if lower.contains("phd")
        || lower.contains("ph.d")
        || lower.contains("doctor")
        || lower.contains("professional degree")
    {
        EducationLevel::Doctorate
    } else if lower.contains("master") {
        EducationLevel::Master
    } else if lower.contains("college degree") || lower.contains("bachelor") {
        EducationLevel::Bachelor
    } else if lower.contains("some college") || lower.contains("high school") {
        EducationLevel::HighSchool
    } else {
        EducationLevel::Unknown
    }
}

pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}
