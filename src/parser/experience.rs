// file: src/parser/experience.rs
// description: textual experience buckets to midpoint years

use crate::error::RecordError;
use crate::parser::patterns::{
    EXPERIENCE_LESS_THAN, EXPERIENCE_OR_LESS, EXPERIENCE_OR_MORE, EXPERIENCE_PLUS,
    EXPERIENCE_RANGE, EXPERIENCE_SINGLE,
};
use regex::Captures;

/// Converts experience-range answers to a single number of years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceParser {
    open_ended_offset: f64,
}

impl ExperienceParser {
    /// `open_ended_offset` is added to the lower bound of buckets with no upper bound.
    pub fn new(open_ended_offset: f64) -> Self {
        Self { open_ended_offset }
    }

    pub fn open_ended_offset(&self) -> f64 {
        self.open_ended_offset
    }

    /// Bounded ranges map to their midpoint, open-ended buckets ("10+ years",
    /// "41 years or more") to `lower + offset`, and "N years or less" / "less than N"
    /// to `N / 2`.
    pub fn parse(&self, text: &str) -> Result<f64, RecordError> {
        let unparseable = || RecordError::UnparseableExperience(text.to_string());
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(unparseable());
        }

        let years = if let Some(caps) = EXPERIENCE_OR_LESS
            .captures(trimmed)
            .or_else(|| EXPERIENCE_LESS_THAN.captures(trimmed))
        {
            number(&caps, 1).map(|upper| upper / 2.0)
        } else if let Some(caps) = EXPERIENCE_PLUS
            .captures(trimmed)
            .or_else(|| EXPERIENCE_OR_MORE.captures(trimmed))
        {
            number(&caps, 1).map(|lower| lower + self.open_ended_offset)
        } else if let Some(caps) = EXPERIENCE_RANGE.captures(trimmed) {
            match (number(&caps, 1), number(&caps, 2)) {
                (Some(a), Some(b)) => Some((a + b) / 2.0),
                _ => None,
            }
        } else if let Some(caps) = EXPERIENCE_SINGLE.captures(trimmed) {
            number(&caps, 1)
        } else {
            None
        };

        match years {
            Some(y) if y.is_finite() && y >= 0.0 => Ok(y),
            _ => Err(unparseable()),
        }
    }
}

fn number(caps: &Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

/// Parse with the default open-ended offset.
pub fn parse_experience(text: &str) -> Result<f64, RecordError> {
    ExperienceParser::new(crate::config::DEFAULT_OPEN_ENDED_OFFSET_YEARS).parse(text)
}
