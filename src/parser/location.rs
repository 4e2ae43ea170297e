// file: src/parser/location.rs
// description: country and US state standardization
// reference: USPS state names and abbreviations

use crate::models::UNKNOWN_STATE;
use crate::parser::patterns::normalize_token;
use lazy_static::lazy_static;
use std::collections::HashMap;

pub const UNITED_STATES: &str = "United States";

const STATES: &[(&str, &str)] = &[
    ("ALABAMA", "AL"),
    ("ALASKA", "AK"),
    ("ARIZONA", "AZ"),
    ("ARKANSAS", "AR"),
    ("CALIFORNIA", "CA"),
    ("COLORADO", "CO"),
    ("CONNECTICUT", "CT"),
    ("DELAWARE", "DE"),
    ("DISTRICT OF COLUMBIA", "DC"),
    ("FLORIDA", "FL"),
    ("GEORGIA", "GA"),
    ("HAWAII", "HI"),
    ("IDAHO", "ID"),
    ("ILLINOIS", "IL"),
    ("INDIANA", "IN"),
    ("IOWA", "IA"),
    ("KANSAS", "KS"),
    ("KENTUCKY", "KY"),
    ("LOUISIANA", "LA"),
    ("MAINE", "ME"),
    ("MARYLAND", "MD"),
    ("MASSACHUSETTS", "MA"),
    ("MICHIGAN", "MI"),
    ("MINNESOTA", "MN"),
    ("MISSISSIPPI", "MS"),
    ("MISSOURI", "MO"),
    ("MONTANA", "MT"),
    ("NEBRASKA", "NE"),
    ("NEVADA", "NV"),
    ("NEW HAMPSHIRE", "NH"),
    ("NEW JERSEY", "NJ"),
    ("NEW MEXICO", "NM"),
    ("NEW YORK", "NY"),
    ("NORTH CAROLINA", "NC"),
    ("NORTH DAKOTA", "ND"),
    ("OHIO", "OH"),
    ("OKLAHOMA", "OK"),
    ("OREGON", "OR"),
    ("PENNSYLVANIA", "PA"),
    ("RHODE ISLAND", "RI"),
    ("SOUTH CAROLINA", "SC"),
    ("SOUTH DAKOTA", "SD"),
    ("TENNESSEE", "TN"),
    ("TEXAS", "TX"),
    ("UTAH", "UT"),
    ("VERMONT", "VT"),
    ("VIRGINIA", "VA"),
    ("WASHINGTON", "WA"),
    ("WEST VIRGINIA", "WV"),
    ("WISCONSIN", "WI"),
    ("WYOMING", "WY"),
];

// Keys are in `normalize_token` form.
const STATE_ALIASES: &[(&str, &str)] = &[
    ("WASHINGTON DC", "DC"),
    ("WASHINGTON D C", "DC"),
    ("WASH DC", "DC"),
    ("DISTRICT OF COLOMBIA", "DC"),
    ("THE DISTRICT", "DC"),
    ("CALI", "CA"),
    ("CALIF", "CA"),
    ("CALIFORNA", "CA"),
    ("MASS", "MA"),
    ("MASSACHUSSETTS", "MA"),
    ("MASSACHUSETS", "MA"),
    ("PENN", "PA"),
    ("PENNSILVANIA", "PA"),
    ("PENNSYLVANNIA", "PA"),
    ("NYC", "NY"),
    ("NEW YORK CITY", "NY"),
    ("NEW YORK STATE", "NY"),
    ("WASHINGTON STATE", "WA"),
    ("CONNETICUT", "CT"),
    ("CONNECTICUTT", "CT"),
    ("MINNISOTA", "MN"),
    ("ILLINIOS", "IL"),
    ("TENNESEE", "TN"),
    ("TENNESSE", "TN"),
    ("MISSISIPPI", "MS"),
    ("ARIZONIA", "AZ"),
    ("N CAROLINA", "NC"),
    ("S CAROLINA", "SC"),
    ("N DAKOTA", "ND"),
    ("S DAKOTA", "SD"),
    ("W VIRGINIA", "WV"),
];

const US_VARIANTS: &[&str] = &[
    "US",
    "USA",
    "U S",
    "U S A",
    "UNITED STATES",
    "UNITED STATES OF AMERICA",
    "THE UNITED STATES",
    "THE US",
    "AMERICA",
    "UNITED STATE",
    "UNITES STATES",
    "UNITED SATES",
];

const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("UK", "United Kingdom"),
    ("UNITED KINGDOM", "United Kingdom"),
    ("GREAT BRITAIN", "United Kingdom"),
    ("BRITAIN", "United Kingdom"),
    ("ENGLAND", "United Kingdom"),
    ("SCOTLAND", "United Kingdom"),
    ("WALES", "United Kingdom"),
    ("NORTHERN IRELAND", "United Kingdom"),
    ("CANADA", "Canada"),
    ("AUSTRALIA", "Australia"),
    ("AUSTRALI", "Australia"),
    ("NEW ZEALAND", "New Zealand"),
    ("NZ", "New Zealand"),
];

lazy_static! {
    static ref EXACT_STATES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        for (name, code) in STATES {
            map.insert(*name, *code);
            map.insert(*code, *code);
        }
        map
    };
    static ref ALIAS_STATES: HashMap<&'static str, &'static str> =
        STATE_ALIASES.iter().copied().collect();
    static ref COUNTRIES: HashMap<&'static str, &'static str> = {
        let mut map: HashMap<&'static str, &'static str> = COUNTRY_ALIASES.iter().copied().collect();
        for variant in US_VARIANTS {
            map.insert(*variant, UNITED_STATES);
        }
        map
    };
}

/// Canonical country name. Known variants are folded; anything else is returned trimmed.
pub fn standardize_country(text: &str) -> String {
    let key = normalize_token(text);
    match COUNTRIES.get(key.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => text.trim().to_string(),
    }
}

pub fn is_united_states(country: &str) -> bool {
    standardize_country(country) == UNITED_STATES
}

/// Two-letter state code for a US location, or `"Unknown"`.
///
/// Exact name or abbreviation first (case-insensitive), then the alias table. Non-US
/// countries and unresolved text map to `"Unknown"`.
pub fn standardize(text: &str, country: &str) -> String {
    if !is_united_states(country) {
        return UNKNOWN_STATE.to_string();
    }

    let exact = text.trim().to_uppercase();
    if let Some(code) = EXACT_STATES.get(exact.as_str()) {
        return code.to_string();
    }

    let key = normalize_token(text);
    EXACT_STATES
        .get(key.as_str())
        .or_else(|| ALIAS_STATES.get(key.as_str()))
        .map(|code| code.to_string())
        .unwrap_or_else(|| UNKNOWN_STATE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete() {
        assert_eq!(STATES.len(), 51);
    }

    #[test]
    fn test_exact_match_name_and_code() {
        assert_eq!(standardize("California", "US"), "CA");
        assert_eq!(standardize("ny", "USA"), "NY");
        assert_eq!(standardize("  Washington ", "United States"), "WA");
    }

    #[test]
    fn test_alias_match() {
        assert_eq!(standardize("Washington, DC", "US"), "DC");
        assert_eq!(standardize("D.C.", "US"), "DC");
        assert_eq!(standardize("Massachussetts", "US"), "MA");
        assert_eq!(standardize("Cali", "U.S."), "CA");
    }

    #[test]
    fn test_unresolved_is_unknown() {
        assert_eq!(standardize("Atlantis", "US"), UNKNOWN_STATE);
        assert_eq!(standardize("", "US"), UNKNOWN_STATE);
        assert_eq!(standardize("California, Oregon", "US"), UNKNOWN_STATE);
    }

    #[test]
    fn test_non_us_country_is_unknown() {
        assert_eq!(standardize("Ontario", "Canada"), UNKNOWN_STATE);
        assert_eq!(standardize("CA", "Canada"), UNKNOWN_STATE);
    }

    #[test]
    fn test_country_variants() {
        assert_eq!(standardize_country("usa"), UNITED_STATES);
        assert_eq!(standardize_country("U.S.A."), UNITED_STATES);
        assert_eq!(standardize_country("United States of America"), UNITED_STATES);
        assert_eq!(standardize_country("england"), "United Kingdom");
        assert_eq!(standardize_country(" Germany "), "Germany");
    }
}
