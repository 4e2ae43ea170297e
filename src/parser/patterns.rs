// file: src/parser/patterns.rs
// description: compiled regex patterns for free-text field parsing
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Salary amounts
    pub static ref SALARY_LEADING: Regex = Regex::new(
        r"(?s)^[\s\p{Sc}A-Za-z]*?(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)(?:\s*([kK]\b))?(.*)$"
    ).expect("SALARY_LEADING regex is valid");

    pub static ref SALARY_RANGE_TAIL: Regex = Regex::new(
        r"(?i)^\s*(?:-|–|—|to)\s*\p{Sc}?\s*\d"
    ).expect("SALARY_RANGE_TAIL regex is valid");

    // decimal comma, a second dot group, a digit past a comma group, or space-separated thousands
    pub static ref SALARY_AMBIGUOUS_TAIL: Regex = Regex::new(
        r"^(?:[.,]\d|\d|\s+\d{3}(?:\D|$))"
    ).expect("SALARY_AMBIGUOUS_TAIL regex is valid");

    pub static ref HOURLY_ANNOTATION: Regex = Regex::new(
        r"(?i)(?:\bper\s+hour\b|\ban\s+hour\b|\bhourly\b|/\s*h(?:ou)?r\b)"
    ).expect("HOURLY_ANNOTATION regex is valid");

    // Experience buckets
    pub static ref EXPERIENCE_RANGE: Regex = Regex::new(
        r"(\d+(?:\.\d+)?)\s*(?:-|–|—|to)\s*(\d+(?:\.\d+)?)"
    ).expect("EXPERIENCE_RANGE regex is valid");

    pub static ref EXPERIENCE_PLUS: Regex = Regex::new(
        r"(\d+(?:\.\d+)?)\s*\+"
    ).expect("EXPERIENCE_PLUS regex is valid");

    pub static ref EXPERIENCE_OR_MORE: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*(?:years?|yrs?)?\s*(?:or\s+more|or\s+over|and\s+(?:up|above|over))"
    ).expect("EXPERIENCE_OR_MORE regex is valid");

    pub static ref EXPERIENCE_OR_LESS: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*(?:years?|yrs?)?\s*or\s+(?:less|fewer)"
    ).expect("EXPERIENCE_OR_LESS regex is valid");

    pub static ref EXPERIENCE_LESS_THAN: Regex = Regex::new(
        r"(?i)(?:less|fewer)\s+than\s+(\d+(?:\.\d+)?)"
    ).expect("EXPERIENCE_LESS_THAN regex is valid");

    pub static ref EXPERIENCE_SINGLE: Regex = Regex::new(
        r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:years?|yrs?)?\s*$"
    ).expect("EXPERIENCE_SINGLE regex is valid");

    // Location cleanup
    pub static ref LOCATION_NOISE: Regex = Regex::new(
        r"[,;/]"
    ).expect("LOCATION_NOISE regex is valid");

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).expect("WHITESPACE regex is valid");
}

/// Upper-case, drop periods, treat separators as spaces, collapse whitespace.
pub fn normalize_token(text: &str) -> String {
    let without_periods = text.replace('.', "");
    let stripped = LOCATION_NOISE.replace_all(&without_periods, " ");
    WHITESPACE
        .replace_all(stripped.trim(), " ")
        .trim()
        .to_uppercase()
}
