// file: src/parser/mod.rs
// description: free-text field parsing module exports
// reference: internal module structure

pub mod demographics;
pub mod experience;
pub mod location;
pub mod patterns;
pub mod salary;

pub use demographics::{parse_education, parse_gender, parse_timestamp};
pub use experience::{ExperienceParser, parse_experience};
pub use location::{UNITED_STATES, standardize, standardize_country};
pub use salary::parse_salary;
