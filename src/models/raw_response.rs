// file: src/models/raw_response.rs
// description: as-received survey row and the tabular batch schema
// reference: Ask A Manager Salary Survey 2021 response columns

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// One survey submission exactly as received. Absent optional columns are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    pub salary: String,
    pub currency: String,
    pub other_currency: String,
    pub country: String,
    pub state: String,
    pub job_title: String,
    pub industry: String,
    pub experience: String,
    pub gender: String,
    pub education: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Salary,
    Currency,
    OtherCurrency,
    Country,
    State,
    JobTitle,
    Industry,
    Experience,
    Gender,
    Education,
    Timestamp,
}

impl Column {
    pub const REQUIRED: [Column; 4] = [
        Column::Salary,
        Column::Currency,
        Column::Country,
        Column::JobTitle,
    ];

    pub const ALL: [Column; 11] = [
        Column::Salary,
        Column::Currency,
        Column::OtherCurrency,
        Column::Country,
        Column::State,
        Column::JobTitle,
        Column::Industry,
        Column::Experience,
        Column::Gender,
        Column::Education,
        Column::Timestamp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Salary => "salary",
            Column::Currency => "currency",
            Column::OtherCurrency => "other_currency",
            Column::Country => "country",
            Column::State => "state",
            Column::JobTitle => "job_title",
            Column::Industry => "industry",
            Column::Experience => "experience",
            Column::Gender => "gender",
            Column::Education => "education",
            Column::Timestamp => "timestamp",
        }
    }

    /// Resolve a header either by its short name or by the survey question wording.
    pub fn from_header(header: &str) -> Option<Column> {
        let h = header.trim().trim_start_matches('\u{feff}').to_lowercase();

        if let Some(col) = Self::ALL.iter().find(|c| c.name() == h) {
            return Some(*col);
        }

        if h.contains("annual salary") {
            Some(Column::Salary)
        } else if h.contains("other") && h.contains("currency") {
            Some(Column::OtherCurrency)
        } else if h.contains("currency") {
            Some(Column::Currency)
        } else if h.contains("what country") {
            Some(Column::Country)
        } else if h.contains("what state") {
            Some(Column::State)
        } else if h.starts_with("job title") {
            Some(Column::JobTitle)
        } else if h.contains("what industry") {
            Some(Column::Industry)
        } else if h.contains("experience") && h.contains("overall") {
            Some(Column::Experience)
        } else if h.contains("gender") {
            Some(Column::Gender)
        } else if h.contains("level of education") {
            Some(Column::Education)
        } else {
            None
        }
    }
}

/// A validated batch of raw rows ready for normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBatch {
    rows: Vec<RawResponse>,
}

impl RawBatch {
    pub fn new(rows: Vec<RawResponse>) -> Self {
        Self { rows }
    }

    /// Build a batch from a header row and positional records.
    ///
    /// Fails only when a required column is absent from the headers. Cells missing from a
    /// short record read as empty text, and unmapped headers are ignored.
    pub fn from_table(headers: &[String], records: Vec<Vec<String>>) -> Result<Self> {
        let mut positions: Vec<(Column, usize)> = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            if let Some(col) = Column::from_header(header) {
                if !positions.iter().any(|(c, _)| *c == col) {
                    positions.push((col, idx));
                }
            }
        }

        let missing: Vec<String> = Column::REQUIRED
            .iter()
            .filter(|col| !positions.iter().any(|(c, _)| c == *col))
            .map(|col| col.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::MissingColumns(missing));
        }

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let mut raw = RawResponse::default();
            for (col, idx) in &positions {
                let value = record.get(*idx).cloned().unwrap_or_default();
                match col {
                    Column::Salary => raw.salary = value,
                    Column::Currency => raw.currency = value,
                    Column::OtherCurrency => raw.other_currency = value,
                    Column::Country => raw.country = value,
                    Column::State => raw.state = value,
                    Column::JobTitle => raw.job_title = value,
                    Column::Industry => raw.industry = value,
                    Column::Experience => raw.experience = value,
                    Column::Gender => raw.gender = value,
                    Column::Education => raw.education = value,
                    Column::Timestamp => raw.timestamp = value,
                }
            }
            rows.push(raw);
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[RawResponse] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<RawResponse> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
