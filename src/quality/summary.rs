// file: src/quality/summary.rs
// description: per-batch tally of retained, dropped and partially resolved rows

use crate::error::RejectionReason;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQualitySummary {
    pub rows_in: usize,
    pub rows_retained: usize,
    pub rows_dropped_by_reason: BTreeMap<RejectionReason, usize>,
    /// Retained rows whose experience text could not be parsed.
    pub experience_unresolved: usize,
    /// Retained rows whose state mapped to "Unknown".
    pub state_unresolved: usize,
    /// Retained rows that fell back to NonTech because no rule matched.
    pub classification_defaulted: usize,
}

impl DataQualitySummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_retained(&mut self) {
        self.rows_in += 1;
        self.rows_retained += 1;
    }

    pub fn record_dropped(&mut self, reason: RejectionReason) {
        self.rows_in += 1;
        *self.rows_dropped_by_reason.entry(reason).or_insert(0) += 1;
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_dropped_by_reason.values().sum()
    }

    pub fn dropped(&self, reason: RejectionReason) -> usize {
        self.rows_dropped_by_reason.get(&reason).copied().unwrap_or(0)
    }

    pub fn retention_rate(&self) -> f64 {
        if self.rows_in == 0 {
            return 0.0;
        }
        (self.rows_retained as f64 / self.rows_in as f64) * 100.0
    }

    /// Combine the tallies of two disjoint parts of a batch.
    pub fn merge(&mut self, other: &DataQualitySummary) {
        self.rows_in += other.rows_in;
        self.rows_retained += other.rows_retained;
        for (reason, count) in &other.rows_dropped_by_reason {
            *self.rows_dropped_by_reason.entry(*reason).or_insert(0) += count;
        }
        self.experience_unresolved += other.experience_unresolved;
        self.state_unresolved += other.state_unresolved;
        self.classification_defaulted += other.classification_defaulted;
    }
}
