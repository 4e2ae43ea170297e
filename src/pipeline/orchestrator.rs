// file: src/pipeline/orchestrator.rs
// description: coordinates chunked normalization, aggregation, and report assembly
// reference: orchestrates the asynchronous batch workflow on tokio's blocking pool

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::insights::{InsightFormatter, InsightReport};
use crate::models::RawBatch;
use crate::pipeline::normalizer::{NormalizationPipeline, NormalizedBatch};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::info;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub batch: NormalizedBatch,
    pub report: InsightReport,
    pub stats: PipelineStats,
}

pub struct PipelineOrchestrator {
    config: Config,
    normalizer: Arc<NormalizationPipeline>,
    formatter: InsightFormatter,
    max_concurrent_tasks: usize,
}

impl PipelineOrchestrator {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let normalizer = Arc::new(NormalizationPipeline::new(&config));
        let formatter = InsightFormatter::new(&config);
        let max_concurrent_tasks = config.pipeline.parallel_workers.max(1);

        Ok(Self {
            config,
            normalizer,
            formatter,
            max_concurrent_tasks,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize and answer every question. Aggregation starts only after all chunks finish.
    pub async fn run(&self, batch: RawBatch) -> Result<AnalysisOutcome> {
        info!("Starting salary insights pipeline");

        let (normalized, stats) = self.normalize_tracked(batch).await?;

        info!("Aggregating {} records...", normalized.records.len());
        let report = self.formatter.format(&normalized);

        self.log_final_stats(&stats);

        Ok(AnalysisOutcome {
            batch: normalized,
            report,
            stats,
        })
    }

    /// Normalize a batch in parallel chunks, preserving input order.
    pub async fn normalize(&self, batch: RawBatch) -> Result<NormalizedBatch> {
        self.normalize_tracked(batch).await.map(|(normalized, _)| normalized)
    }

    async fn normalize_tracked(&self, batch: RawBatch) -> Result<(NormalizedBatch, PipelineStats)> {
        if batch.is_empty() {
            return Err(PipelineError::EmptyBatch);
        }

        let total = batch.len();
        let progress = Arc::new(if self.config.pipeline.show_progress {
            ProgressTracker::new(total)
        } else {
            ProgressTracker::hidden(total)
        });

        let chunk_size = total.div_ceil(self.max_concurrent_tasks);
        let rows = Arc::new(batch.into_rows());

        info!(
            "Normalizing {} rows in chunks of {} with {} concurrent tasks...",
            total, chunk_size, self.max_concurrent_tasks
        );

        let tasks = (0..total).step_by(chunk_size).map(|offset| {
            let normalizer = self.normalizer.clone();
            let rows = rows.clone();
            let progress = progress.clone();

            async move {
                let end = (offset + chunk_size).min(rows.len());
                let chunk = tokio::task::spawn_blocking(move || {
                    normalizer.normalize_rows(offset, &rows[offset..end])
                })
                .await
                .map_err(|e| {
                    PipelineError::Worker(format!("Normalization task failed: {}", e))
                })?;

                progress.add_chunk(chunk.summary.rows_retained, chunk.summary.rows_dropped());
                Ok::<_, PipelineError>(chunk)
            }
        });

        // `buffered` yields chunks in submission order, so records stay in input order.
        let chunks: Vec<NormalizedBatch> = stream::iter(tasks)
            .buffered(self.max_concurrent_tasks)
            .try_collect()
            .await?;

        let mut normalized = NormalizedBatch::default();
        for chunk in chunks {
            normalized.extend(chunk);
        }

        let stats = progress.get_stats();
        progress.finish();

        Ok((normalized, stats))
    }

    fn log_final_stats(&self, stats: &PipelineStats) {
        info!("=== Pipeline Execution Summary ===");
        info!("Duration: {:.3} seconds", stats.duration_secs);
        info!("Rows processed: {}", stats.rows_processed);
        info!("Rows retained: {}", stats.rows_retained);
        info!("Rows dropped: {}", stats.rows_dropped);
        info!("Retention rate: {:.2}%", stats.retention_rate());
        info!("Chunks: {}", stats.chunks);
        info!("Processing speed: {:.2} rows/sec", stats.rows_per_second());
        info!("=================================");
    }
}
