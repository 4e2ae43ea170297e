// file: src/insights/mod.rs
// description: business-question answers and report schema
// reference: internal module structure

pub mod formatter;

pub use formatter::{Answer, AnswerValue, InsightFormatter, InsightReport, QuestionId};
