// file: src/models/aggregate.rs
// description: grouped metric results with sample-size confidence tiers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn from_sample_size(sample_size: usize, medium_min: usize, high_min: usize) -> Self {
        if sample_size >= high_min {
            ConfidenceTier::High
        } else if sample_size >= medium_min {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Median,
    Mean,
    Q1,
    Q3,
    Correlation,
    Slope,
    GapPercent,
    PremiumPercent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub group_key: String,
    pub metric: Metric,
    /// `None` when the metric is undefined for the group.
    pub value: Option<f64>,
    pub sample_size: usize,
    pub confidence: ConfidenceTier,
}

impl AggregateResult {
    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }
}
