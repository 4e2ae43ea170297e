// file: src/parser/salary.rs
// description: free-text salary amount parsing
// reference: annualized salary answers with symbols, separators and annotations

use crate::error::RecordError;
use crate::parser::patterns::{
    HOURLY_ANNOTATION, SALARY_AMBIGUOUS_TAIL, SALARY_LEADING, SALARY_RANGE_TAIL,
};

/// Parse the leading numeric token of a salary answer.
///
/// Currency symbols and currency codes in front of the number are stripped. Commas are
/// accepted only as three-digit thousands groups, and a `k` suffix multiplies by one thousand. Trailing annotations such as
/// `"+ bonus"` are dropped. The following are rejected rather than guessed at:
///
/// - stated ranges (`"60,000 - 70,000"`), which are never averaged here
/// - hourly figures (`"25 per hour"`)
/// - numbers whose separators cannot be read unambiguously (`"1.000.000"`, `"85000,5"`,
///   `"120 000"`)
pub fn parse_salary(text: &str) -> Result<f64, RecordError> {
    let unparseable = || RecordError::UnparseableSalary(text.to_string());

    let trimmed = text.trim();
    let caps = SALARY_LEADING.captures(trimmed).ok_or_else(unparseable)?;

    let digits: String = caps[1].chars().filter(|c| *c != ',').collect();
    let mut amount: f64 = digits.parse().map_err(|_| unparseable())?;

    if caps.get(2).is_some() {
        amount *= 1000.0;
    }

    let tail = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    if SALARY_RANGE_TAIL.is_match(tail)
        || SALARY_AMBIGUOUS_TAIL.is_match(tail)
        || HOURLY_ANNOTATION.is_match(tail)
    {
        return Err(unparseable());
    }

    if !amount.is_finite() {
        return Err(unparseable());
    }

    Ok(amount)
}
