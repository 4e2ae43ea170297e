// file: src/currency/converter.rs
// description: fixed-table currency conversion to USD
// reference: 2021 average exchange rates

use crate::config::CurrencyConfig;
use crate::error::RecordError;
use crate::parser::patterns::normalize_token;
use std::collections::BTreeMap;

pub const BASE_CURRENCY: &str = "USD";

const OTHER_MARKER: &str = "OTHER";

// Free-text spellings seen in the "other currency" answer. Keys are upper-case.
const CURRENCY_ALIASES: &[(&str, &str)] = &[
    ("US DOLLAR", "USD"),
    ("US DOLLARS", "USD"),
    ("DOLLAR", "USD"),
    ("DOLLARS", "USD"),
    ("US$", "USD"),
    ("$", "USD"),
    ("AMERICAN DOLLARS", "USD"),
    ("POUND", "GBP"),
    ("POUNDS", "GBP"),
    ("POUND STERLING", "GBP"),
    ("STERLING", "GBP"),
    ("BRITISH POUND", "GBP"),
    ("£", "GBP"),
    ("EURO", "EUR"),
    ("EUROS", "EUR"),
    ("€", "EUR"),
    ("CANADIAN", "CAD"),
    ("CANADIAN DOLLAR", "CAD"),
    ("CANADIAN DOLLARS", "CAD"),
    ("CDN", "CAD"),
    ("AUSTRALIAN", "AUD"),
    ("AUSTRALIAN DOLLAR", "AUD"),
    ("AUSTRALIAN DOLLARS", "AUD"),
    ("AUD/NZD", "AUD"),
];

/// Read-only conversion table. Rates are USD per unit of the keyed currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyConverter {
    reference_year: u16,
    rates: BTreeMap<String, f64>,
}

impl CurrencyConverter {
    pub fn new(config: &CurrencyConfig) -> Self {
        let rates = config
            .rates
            .iter()
            .map(|(code, rate)| (code.trim().to_uppercase(), *rate))
            .collect();

        Self {
            reference_year: config.reference_year,
            rates,
        }
    }

    pub fn reference_year(&self) -> u16 {
        self.reference_year
    }

    pub fn rates(&self) -> &BTreeMap<String, f64> {
        &self.rates
    }

    pub fn supports(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn convert(&self, amount: f64, currency_code: &str) -> Result<f64, RecordError> {
        self.rate(currency_code).map(|rate| amount * rate)
    }

    pub fn convert_inverse(&self, usd_amount: f64, currency_code: &str) -> Result<f64, RecordError> {
        self.rate(currency_code).map(|rate| usd_amount / rate)
    }

    fn rate(&self, currency_code: &str) -> Result<f64, RecordError> {
        let code = currency_code.trim().to_uppercase();
        self.rates
            .get(&code)
            .copied()
            .ok_or_else(|| RecordError::UnsupportedCurrency(currency_code.to_string()))
    }

    /// Resolve the survey's currency answer to a code in the table.
    ///
    /// `"AUD/NZD"` resolves to AUD. When the answer is `"Other"`, the free-text field is
    /// looked up as a code first and then through the alias table.
    pub fn resolve_code(&self, currency: &str, other_currency: &str) -> Result<String, RecordError> {
        let primary = normalize_code(currency);

        let candidate = if primary == OTHER_MARKER {
            normalize_code(other_currency)
        } else {
            primary
        };

        if self.supports(&candidate) {
            return Ok(candidate);
        }

        let unsupported = if candidate.is_empty() {
            currency.trim().to_string()
        } else {
            candidate
        };
        Err(RecordError::UnsupportedCurrency(unsupported))
    }
}

fn normalize_code(text: &str) -> String {
    let trimmed = text.trim().to_uppercase();
    if let Some((_, code)) = CURRENCY_ALIASES.iter().find(|(alias, _)| *alias == trimmed) {
        return code.to_string();
    }

    let token = normalize_token(text);
    CURRENCY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, code)| code.to_string())
        .unwrap_or(token)
}
