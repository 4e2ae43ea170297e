// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod normalizer;
mod orchestrator;
mod progress;

pub use normalizer::{NormalizationPipeline, NormalizedBatch};
pub use orchestrator::{AnalysisOutcome, PipelineOrchestrator};
pub use progress::{PipelineStats, ProgressTracker};
