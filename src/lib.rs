// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod aggregation;
pub mod classifier;
pub mod config;
pub mod currency;
pub mod error;
pub mod exporter;
pub mod input;
pub mod insights;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod quality;
pub mod utils;

pub use aggregation::AggregationEngine;
pub use classifier::{Classification, JobClassifier};
pub use config::{
    AnalysisConfig, ClassificationConfig, Config, CurrencyConfig, DEFAULT_OPEN_ENDED_OFFSET_YEARS,
    KeywordRule, MatchTarget, PipelineConfig,
};
pub use currency::CurrencyConverter;
pub use error::{PipelineError, RecordError, RejectionReason, Result};
pub use exporter::json::{ExportManifest, ExportedFile, JsonExporter};
pub use input::read_batch;
pub use insights::{Answer, AnswerValue, InsightFormatter, InsightReport, QuestionId};
pub use models::{
    AggregateResult, CanonicalRecord, ConfidenceTier, EducationLevel, Gender, JobCategory,
    Metric, RawBatch, RawResponse,
};
pub use pipeline::{
    AnalysisOutcome, NormalizationPipeline, NormalizedBatch, PipelineOrchestrator,
    PipelineStats, ProgressTracker,
};
pub use quality::{DataQualitySummary, QualityFilter, Verdict};
pub use utils::Validator;
