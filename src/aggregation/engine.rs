// file: src/aggregation/engine.rs
// description: grouped metrics over canonical records with confidence tiers
// reference: every result carries its sample size; undefined metrics are None, never zero

use crate::aggregation::stats;
use crate::config::AnalysisConfig;
use crate::models::{AggregateResult, CanonicalRecord, ConfidenceTier, Metric};
use std::collections::BTreeMap;

pub struct AggregationEngine {
    medium_min: usize,
    high_min: usize,
}

impl AggregationEngine {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            medium_min: config.medium_confidence_min,
            high_min: config.high_confidence_min,
        }
    }

    pub fn confidence(&self, sample_size: usize) -> ConfidenceTier {
        ConfidenceTier::from_sample_size(sample_size, self.medium_min, self.high_min)
    }

    /// Partition records by a key, keeping input order inside each group.
    pub fn group_by<'a, K, F>(
        &self,
        records: &[&'a CanonicalRecord],
        key: F,
    ) -> BTreeMap<K, Vec<&'a CanonicalRecord>>
    where
        K: Ord,
        F: Fn(&CanonicalRecord) -> K,
    {
        let mut groups: BTreeMap<K, Vec<&'a CanonicalRecord>> = BTreeMap::new();
        for record in records.iter().copied() {
            groups.entry(key(record)).or_default().push(record);
        }
        groups
    }

    pub fn median(&self, group_key: &str, records: &[&CanonicalRecord]) -> AggregateResult {
        let salaries = salaries(records);
        self.result(group_key, Metric::Median, stats::median(&salaries), salaries.len())
    }

    pub fn mean(&self, group_key: &str, records: &[&CanonicalRecord]) -> AggregateResult {
        let salaries = salaries(records);
        self.result(group_key, Metric::Mean, stats::mean(&salaries), salaries.len())
    }

    /// Median, mean and both quartiles of a group.
    pub fn describe(&self, group_key: &str, records: &[&CanonicalRecord]) -> Vec<AggregateResult> {
        let salaries = salaries(records);
        let n = salaries.len();
        let quartiles = stats::quartiles(&salaries);

        vec![
            self.result(group_key, Metric::Median, stats::median(&salaries), n),
            self.result(group_key, Metric::Mean, stats::mean(&salaries), n),
            self.result(group_key, Metric::Q1, quartiles.map(|(q1, _)| q1), n),
            self.result(group_key, Metric::Q3, quartiles.map(|(_, q3)| q3), n),
        ]
    }

    /// Pearson r between experience and salary. Records without experience are skipped.
    pub fn correlation(&self, group_key: &str, records: &[&CanonicalRecord]) -> AggregateResult {
        let pairs = experience_pairs(records);
        self.result(group_key, Metric::Correlation, stats::pearson(&pairs), pairs.len())
    }

    /// Salary increase in USD per additional year of experience.
    pub fn slope(&self, group_key: &str, records: &[&CanonicalRecord]) -> AggregateResult {
        let pairs = experience_pairs(records);
        self.result(group_key, Metric::Slope, stats::slope(&pairs), pairs.len())
    }

    /// Percentage by which the median of `a` exceeds the median of `b`.
    pub fn gap(
        &self,
        group_key: &str,
        a: &[&CanonicalRecord],
        b: &[&CanonicalRecord],
    ) -> AggregateResult {
        self.paired(group_key, Metric::GapPercent, a, b)
    }

    pub fn premium(
        &self,
        group_key: &str,
        a: &[&CanonicalRecord],
        b: &[&CanonicalRecord],
    ) -> AggregateResult {
        self.paired(group_key, Metric::PremiumPercent, a, b)
    }

    fn paired(
        &self,
        group_key: &str,
        metric: Metric,
        a: &[&CanonicalRecord],
        b: &[&CanonicalRecord],
    ) -> AggregateResult {
        let median_a = stats::median(&salaries(a));
        let median_b = stats::median(&salaries(b));
        let value = match (median_a, median_b) {
            (Some(x), Some(y)) => match metric {
                Metric::PremiumPercent => stats::premium_percent(x, y),
                _ => stats::gap_percent(x, y),
            },
            _ => None,
        };

        // A comparison is only as reliable as its smaller side.
        AggregateResult {
            group_key: group_key.to_string(),
            metric,
            value,
            sample_size: a.len() + b.len(),
            confidence: self.confidence(a.len().min(b.len())),
        }
    }

    fn result(
        &self,
        group_key: &str,
        metric: Metric,
        value: Option<f64>,
        sample_size: usize,
    ) -> AggregateResult {
        AggregateResult {
            group_key: group_key.to_string(),
            metric,
            value,
            sample_size,
            confidence: self.confidence(sample_size),
        }
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new(&crate::config::Config::default_config().analysis)
    }
}

fn salaries(records: &[&CanonicalRecord]) -> Vec<f64> {
    records.iter().map(|r| r.salary_usd).collect()
}

fn experience_pairs(records: &[&CanonicalRecord]) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| r.experience_years.map(|years| (years, r.salary_usd)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationLevel, Gender, JobCategory};
    use pretty_assertions::assert_eq;

    fn record(salary: f64, experience: Option<f64>, state: &str) -> CanonicalRecord {
        CanonicalRecord {
            source_row: 0,
            salary_usd: salary,
            currency_original: "USD".to_string(),
            country: "United States".to_string(),
            state: state.to_string(),
            job_title: "Engineer".to_string(),
            job_category: JobCategory::Tech,
            tech_industry: true,
            software_engineer: false,
            industry: "Computing or Tech".to_string(),
            experience_years: experience,
            gender: Gender::OtherOrUnknown,
            education_level: EducationLevel::Unknown,
            submitted_at: None,
        }
    }

    #[test]
    fn test_describe_small_group_is_low() {
        let records = vec![
            record(100_000.0, None, "CA"),
            record(120_000.0, None, "CA"),
            record(140_000.0, None, "CA"),
        ];
        let refs: Vec<&CanonicalRecord> = records.iter().collect();
        let results = AggregationEngine::default().describe("CA", &refs);

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].metric, Metric::Median);
        assert_eq!(results[0].value, Some(120_000.0));
        assert_eq!(results[1].value, Some(120_000.0));
        assert_eq!(results[2].value, Some(110_000.0));
        assert_eq!(results[3].value, Some(130_000.0));
        assert!(results.iter().all(|r| r.confidence == ConfidenceTier::Low));
        assert!(results.iter().all(|r| r.sample_size == 3));
    }

    #[test]
    fn test_group_by_state() {
        let records = vec![
            record(1.0, None, "WA"),
            record(2.0, None, "CA"),
            record(3.0, None, "WA"),
        ];
        let refs: Vec<&CanonicalRecord> = records.iter().collect();
        let groups = AggregationEngine::default().group_by(&refs, |r| r.state.clone());

        assert_eq!(groups.keys().cloned().collect::<Vec<_>>(), vec!["CA", "WA"]);
        assert_eq!(groups["WA"].len(), 2);
        assert_eq!(groups["WA"][1].salary_usd, 3.0);
    }

    #[test]
    fn test_correlation_skips_missing_experience() {
        let records = vec![
            record(50_000.0, Some(1.0), "CA"),
            record(70_000.0, Some(3.0), "CA"),
            record(90_000.0, Some(5.0), "CA"),
            record(500_000.0, None, "CA"),
        ];
        let refs: Vec<&CanonicalRecord> = records.iter().collect();
        let engine = AggregationEngine::default();

        let r = engine.correlation("tech", &refs);
        assert_eq!(r.sample_size, 3);
        assert!((r.value.unwrap() - 1.0).abs() < 1e-9);

        let s = engine.slope("tech", &refs);
        assert!((s.value.unwrap() - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_correlation_undefined_with_single_experience_value() {
        let records = vec![
            record(50_000.0, Some(4.0), "CA"),
            record(70_000.0, Some(4.0), "CA"),
        ];
        let refs: Vec<&CanonicalRecord> = records.iter().collect();
        let r = AggregationEngine::default().correlation("tech", &refs);

        assert_eq!(r.value, None);
        assert!(!r.is_defined());
        assert_eq!(r.sample_size, 2);
    }

    #[test]
    fn test_gap_uses_medians_and_smaller_side_for_confidence() {
        let men: Vec<CanonicalRecord> = (0..40).map(|_| record(125_000.0, None, "CA")).collect();
        let women: Vec<CanonicalRecord> = (0..3).map(|_| record(95_000.0, None, "CA")).collect();
        let a: Vec<&CanonicalRecord> = men.iter().collect();
        let b: Vec<&CanonicalRecord> = women.iter().collect();

        let gap = AggregationEngine::default().gap("tech", &a, &b);
        assert_eq!(gap.metric, Metric::GapPercent);
        assert!((gap.value.unwrap() - 31.578947).abs() < 1e-4);
        assert_eq!(gap.sample_size, 43);
        assert_eq!(gap.confidence, ConfidenceTier::Low);
    }

    #[test]
    fn test_gap_with_empty_side_is_undefined() {
        let men = vec![record(125_000.0, None, "CA")];
        let a: Vec<&CanonicalRecord> = men.iter().collect();
        let premium = AggregationEngine::default().premium("us", &a, &[]);

        assert_eq!(premium.metric, Metric::PremiumPercent);
        assert_eq!(premium.value, None);
    }
}
