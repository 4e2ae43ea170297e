// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for pipeline execution
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub rows_processed: usize,
    pub rows_retained: usize,
    pub rows_dropped: usize,
    pub chunks: usize,
    pub duration_secs: f64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.rows_processed as f64 / self.duration_secs
    }

    pub fn retention_rate(&self) -> f64 {
        if self.rows_processed == 0 {
            return 0.0;
        }
        (self.rows_retained as f64 / self.rows_processed as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    rows_processed: Arc<AtomicUsize>,
    rows_retained: Arc<AtomicUsize>,
    rows_dropped: Arc<AtomicUsize>,
    chunks: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ProgressTracker {
    /// A visible tracker, colored unless coloring was turned off (`--color false`, `NO_COLOR`).
    pub fn new(total_rows: usize) -> Self {
        let colored = colored::control::SHOULD_COLORIZE.should_colorize();
        Self::with_options(total_rows, true, colored)
    }

    /// A tracker that counts but never draws.
    pub fn hidden(total_rows: usize) -> Self {
        Self::with_options(total_rows, false, false)
    }

    fn with_options(total_rows: usize, visible: bool, colored: bool) -> Self {
        let multi_progress = if visible {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let main_bar = create_progress_bar(&multi_progress, total_rows as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            rows_processed: Arc::new(AtomicUsize::new(0)),
            rows_retained: Arc::new(AtomicUsize::new(0)),
            rows_dropped: Arc::new(AtomicUsize::new(0)),
            chunks: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Record the outcome of one normalized chunk.
    pub fn add_chunk(&self, retained: usize, dropped: usize) {
        let rows = retained + dropped;
        self.chunks.fetch_add(1, Ordering::SeqCst);
        self.rows_processed.fetch_add(rows, Ordering::SeqCst);
        self.rows_retained.fetch_add(retained, Ordering::SeqCst);
        self.rows_dropped.fetch_add(dropped, Ordering::SeqCst);
        self.main_bar.inc(rows as u64);
        self.update_detail_bar();
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Normalization complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            rows_processed: self.rows_processed.load(Ordering::SeqCst),
            rows_retained: self.rows_retained.load(Ordering::SeqCst),
            rows_dropped: self.rows_dropped.load(Ordering::SeqCst),
            chunks: self.chunks.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs_f64(),
        }
    }

    fn update_detail_bar(&self) {
        let retained = self.rows_retained.load(Ordering::SeqCst);
        let dropped = self.rows_dropped.load(Ordering::SeqCst);

        let message = format!("Retained: {} | Dropped: {}", retained, dropped);

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} rows {msg}"
    };
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        bar.set_style(style.progress_chars(if colored { "█▓▒░" } else { "=>-" }));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}
