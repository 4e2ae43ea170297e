// file: src/insights/formatter.rs
// description: answers the fixed business questions from a normalized batch
// reference: maps aggregate results onto a stable, serializable question schema

use crate::aggregation::AggregationEngine;
use crate::config::Config;
use crate::models::{AggregateResult, CanonicalRecord, ConfidenceTier, EducationLevel, Gender};
use crate::pipeline::NormalizedBatch;
use crate::quality::DataQualitySummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    SoftwareEngineerMedianUs,
    HighestPayingTechState,
    ExperienceSalaryCorrelation,
    ExperienceSalarySlope,
    HighestPayingNonTechIndustry,
    GenderGapTech,
    EducationPremiumMasters,
}

impl QuestionId {
    pub const ALL: [QuestionId; 7] = [
        QuestionId::SoftwareEngineerMedianUs,
        QuestionId::HighestPayingTechState,
        QuestionId::ExperienceSalaryCorrelation,
        QuestionId::ExperienceSalarySlope,
        QuestionId::HighestPayingNonTechIndustry,
        QuestionId::GenderGapTech,
        QuestionId::EducationPremiumMasters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionId::SoftwareEngineerMedianUs => "software_engineer_median_us",
            QuestionId::HighestPayingTechState => "highest_paying_tech_state",
            QuestionId::ExperienceSalaryCorrelation => "experience_salary_correlation",
            QuestionId::ExperienceSalarySlope => "experience_salary_slope",
            QuestionId::HighestPayingNonTechIndustry => "highest_paying_non_tech_industry",
            QuestionId::GenderGapTech => "gender_gap_tech",
            QuestionId::EducationPremiumMasters => "education_premium_masters",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QuestionId::SoftwareEngineerMedianUs => "Median salary of US software engineers",
            QuestionId::HighestPayingTechState => "US state with the highest mean tech salary",
            QuestionId::ExperienceSalaryCorrelation => {
                "Correlation between experience and tech salary"
            }
            QuestionId::ExperienceSalarySlope => "Tech salary increase per year of experience",
            QuestionId::HighestPayingNonTechIndustry => {
                "Non-tech industry with the highest median salary"
            }
            QuestionId::GenderGapTech => "Gender pay gap in US tech (men over women)",
            QuestionId::EducationPremiumMasters => "Master's degree premium over Bachelor's",
        }
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerValue {
    Amount { usd: f64 },
    Percent { value: f64 },
    Coefficient { value: f64 },
    UsdPerYear { usd: f64 },
    TopGroup { group: String, usd: f64 },
    Undefined { reason: String },
}

impl AnswerValue {
    pub fn is_defined(&self) -> bool {
        !matches!(self, AnswerValue::Undefined { .. })
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Amount { usd } => write!(f, "${:.0}", usd),
            AnswerValue::Percent { value } => write!(f, "{:.2}%", value),
            AnswerValue::Coefficient { value } => write!(f, "{:.3}", value),
            AnswerValue::UsdPerYear { usd } => write!(f, "${:.0}/year", usd),
            AnswerValue::TopGroup { group, usd } => write!(f, "{} (${:.0})", group, usd),
            AnswerValue::Undefined { reason } => write!(f, "undefined: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer_value: AnswerValue,
    pub sample_size: usize,
    pub confidence_tier: ConfidenceTier,
    /// Underlying aggregates, e.g. every qualifying group for a top-group question.
    pub supporting: Vec<AggregateResult>,
}

impl Answer {
    fn undefined(reason: impl Into<String>, sample_size: usize, confidence: ConfidenceTier) -> Self {
        Self {
            answer_value: AnswerValue::Undefined {
                reason: reason.into(),
            },
            sample_size,
            confidence_tier: confidence,
            supporting: Vec::new(),
        }
    }

    fn from_result(result: AggregateResult, wrap: impl Fn(f64) -> AnswerValue) -> Self {
        let answer_value = match result.value {
            Some(v) => wrap(v),
            None => AnswerValue::Undefined {
                reason: format!(
                    "{:?} undefined for {} ({} records)",
                    result.metric, result.group_key, result.sample_size
                ),
            },
        };
        Self {
            answer_value,
            sample_size: result.sample_size,
            confidence_tier: result.confidence,
            supporting: vec![result],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Year of the exchange-rate table used for conversion.
    pub reference_year: u16,
    pub answers: BTreeMap<QuestionId, Answer>,
    pub data_quality: DataQualitySummary,
}

impl InsightReport {
    pub fn answer(&self, id: QuestionId) -> Option<&Answer> {
        self.answers.get(&id)
    }

    pub fn low_confidence(&self) -> Vec<QuestionId> {
        self.answers
            .iter()
            .filter(|(_, a)| a.confidence_tier == ConfidenceTier::Low)
            .map(|(id, _)| *id)
            .collect()
    }
}

pub struct InsightFormatter {
    engine: AggregationEngine,
    reference_year: u16,
    min_state_group_size: usize,
    min_industry_group_size: usize,
}

impl InsightFormatter {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: AggregationEngine::new(&config.analysis),
            reference_year: config.currency.reference_year,
            min_state_group_size: config.analysis.min_state_group_size,
            min_industry_group_size: config.analysis.min_industry_group_size,
        }
    }

    pub fn format(&self, batch: &NormalizedBatch) -> InsightReport {
        let us: Vec<&CanonicalRecord> = batch.records.iter().filter(|r| r.is_us()).collect();
        let us_tech: Vec<&CanonicalRecord> = us.iter().copied().filter(|r| r.is_tech()).collect();

        info!(
            "Answering {} questions over {} US records ({} tech)",
            QuestionId::ALL.len(),
            us.len(),
            us_tech.len()
        );

        let mut answers = BTreeMap::new();
        for id in QuestionId::ALL {
            let answer = match id {
                QuestionId::SoftwareEngineerMedianUs => self.software_engineer_median(&us),
                QuestionId::HighestPayingTechState => self.highest_paying_tech_state(&us_tech),
                QuestionId::ExperienceSalaryCorrelation => Answer::from_result(
                    self.engine.correlation("us_tech", &us_tech),
                    |value| AnswerValue::Coefficient { value },
                ),
                QuestionId::ExperienceSalarySlope => Answer::from_result(
                    self.engine.slope("us_tech", &us_tech),
                    |usd| AnswerValue::UsdPerYear { usd },
                ),
                QuestionId::HighestPayingNonTechIndustry => self.highest_paying_non_tech(&us),
                QuestionId::GenderGapTech => self.gender_gap(&us_tech),
                QuestionId::EducationPremiumMasters => self.education_premium(&us),
            };

            match &answer.answer_value {
                AnswerValue::Undefined { reason } => warn!("{}: skipped, {}", id, reason),
                _ if answer.confidence_tier == ConfidenceTier::Low => warn!(
                    "{}: low confidence ({} records)",
                    id, answer.sample_size
                ),
                _ => {}
            }

            answers.insert(id, answer);
        }

        InsightReport {
            reference_year: self.reference_year,
            answers,
            data_quality: batch.summary.clone(),
        }
    }

    fn software_engineer_median(&self, us: &[&CanonicalRecord]) -> Answer {
        let engineers: Vec<&CanonicalRecord> =
            us.iter().copied().filter(|r| r.software_engineer).collect();
        Answer::from_result(self.engine.median("us_software_engineer", &engineers), |usd| {
            AnswerValue::Amount { usd }
        })
    }

    fn highest_paying_tech_state(&self, us_tech: &[&CanonicalRecord]) -> Answer {
        let known: Vec<&CanonicalRecord> =
            us_tech.iter().copied().filter(|r| r.has_known_state()).collect();
        let groups = self.engine.group_by(&known, |r| r.state.clone());

        let results: Vec<AggregateResult> = groups
            .iter()
            .filter(|(_, members)| members.len() >= self.min_state_group_size)
            .map(|(state, members)| self.engine.mean(state, members))
            .collect();

        self.top_group(results, known.len(), "state", self.min_state_group_size)
    }

    fn highest_paying_non_tech(&self, us: &[&CanonicalRecord]) -> Answer {
        let non_tech: Vec<&CanonicalRecord> = us
            .iter()
            .copied()
            .filter(|r| !r.tech_industry && !r.industry.is_empty())
            .collect();
        let groups = self.engine.group_by(&non_tech, |r| r.industry.clone());

        let results: Vec<AggregateResult> = groups
            .iter()
            .filter(|(_, members)| members.len() >= self.min_industry_group_size)
            .map(|(industry, members)| self.engine.median(industry, members))
            .collect();

        self.top_group(
            results,
            non_tech.len(),
            "industry",
            self.min_industry_group_size,
        )
    }

    /// Highest-valued group. Ties keep the alphabetically first key.
    fn top_group(
        &self,
        mut results: Vec<AggregateResult>,
        considered: usize,
        label: &str,
        min_size: usize,
    ) -> Answer {
        let mut top: Option<(String, f64, usize, ConfidenceTier)> = None;
        for result in &results {
            if let Some(value) = result.value {
                if top.as_ref().is_none_or(|(_, best, _, _)| value > *best) {
                    top = Some((
                        result.group_key.clone(),
                        value,
                        result.sample_size,
                        result.confidence,
                    ));
                }
            }
        }

        let Some((group, usd, sample_size, confidence)) = top else {
            return Answer::undefined(
                format!("no {} with at least {} records", label, min_size),
                considered,
                self.engine.confidence(considered),
            );
        };

        results.sort_by(|a, b| {
            b.value
                .unwrap_or(f64::MIN)
                .total_cmp(&a.value.unwrap_or(f64::MIN))
                .then_with(|| a.group_key.cmp(&b.group_key))
        });

        Answer {
            answer_value: AnswerValue::TopGroup { group, usd },
            sample_size,
            confidence_tier: confidence,
            supporting: results,
        }
    }

    fn gender_gap(&self, us_tech: &[&CanonicalRecord]) -> Answer {
        let men: Vec<&CanonicalRecord> = us_tech
            .iter()
            .copied()
            .filter(|r| r.gender == Gender::Man)
            .collect();
        let women: Vec<&CanonicalRecord> = us_tech
            .iter()
            .copied()
            .filter(|r| r.gender == Gender::Woman)
            .collect();

        let mut answer = Answer::from_result(self.engine.gap("us_tech", &men, &women), |value| {
            AnswerValue::Percent { value }
        });
        answer.supporting.push(self.engine.median("us_tech_men", &men));
        answer.supporting.push(self.engine.median("us_tech_women", &women));
        answer
    }

    fn education_premium(&self, us: &[&CanonicalRecord]) -> Answer {
        let masters: Vec<&CanonicalRecord> = us
            .iter()
            .copied()
            .filter(|r| r.education_level == EducationLevel::Master)
            .collect();
        let bachelors: Vec<&CanonicalRecord> = us
            .iter()
            .copied()
            .filter(|r| r.education_level == EducationLevel::Bachelor)
            .collect();

        let mut answer =
            Answer::from_result(self.engine.premium("us", &masters, &bachelors), |value| {
                AnswerValue::Percent { value }
            });
        answer.supporting.push(self.engine.median("us_master", &masters));
        answer.supporting.push(self.engine.median("us_bachelor", &bachelors));
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RejectionReason;
    use crate::models::{RawBatch, RawResponse};
    use crate::pipeline::NormalizationPipeline;
    use pretty_assertions::assert_eq;

    /// Ten US tech rows plus two rows that must be dropped.
    fn fixture() -> RawBatch {
        let mut rows: Vec<RawResponse> = (0..10)
            .map(|i| RawResponse {
                salary: format!("{}", 100_000 + i * 5_000),
                currency: "USD".to_string(),
                country: "United States".to_string(),
                state: if i < 5 { "California" } else { "Washington" }.to_string(),
                job_title: "Software Engineer".to_string(),
                industry: "Computing or Tech".to_string(),
                experience: format!("{} years", i + 1),
                gender: if i % 2 == 0 { "Man" } else { "Woman" }.to_string(),
                education: if i % 2 == 0 {
                    "College degree"
                } else {
                    "Master's degree"
                }
                .to_string(),
                ..Default::default()
            })
            .collect();

        rows.push(RawResponse {
            salary: "5000".to_string(),
            currency: "USD".to_string(),
            country: "US".to_string(),
            job_title: "Intern".to_string(),
            ..Default::default()
        });
        rows.push(RawResponse {
            salary: "100000".to_string(),
            currency: "CHF".to_string(),
            country: "Switzerland".to_string(),
            job_title: "Engineer".to_string(),
            ..Default::default()
        });

        RawBatch::new(rows)
    }

    fn report() -> InsightReport {
        let config = Config::default_config();
        let batch = NormalizationPipeline::new(&config)
            .normalize(&fixture())
            .unwrap();
        InsightFormatter::new(&config).format(&batch)
    }

    #[test]
    fn test_end_to_end_fixture() {
        let report = report();

        assert_eq!(report.reference_year, 2021);
        assert_eq!(report.answers.len(), QuestionId::ALL.len());

        let quality = &report.data_quality;
        assert_eq!(quality.rows_in, 12);
        assert_eq!(quality.rows_retained, 10);
        assert_eq!(quality.dropped(RejectionReason::OutlierSalary), 1);
        assert_eq!(quality.dropped(RejectionReason::UnsupportedCurrency), 1);

        let median = report.answer(QuestionId::SoftwareEngineerMedianUs).unwrap();
        assert_eq!(median.answer_value, AnswerValue::Amount { usd: 122_500.0 });
        assert_eq!(median.sample_size, 10);
        assert_eq!(median.confidence_tier, ConfidenceTier::Low);

        match &report
            .answer(QuestionId::ExperienceSalaryCorrelation)
            .unwrap()
            .answer_value
        {
            AnswerValue::Coefficient { value } => assert!(*value > 0.99),
            other => panic!("unexpected answer: {other:?}"),
        }

        match &report.answer(QuestionId::ExperienceSalarySlope).unwrap().answer_value {
            AnswerValue::UsdPerYear { usd } => assert!((usd - 5_000.0).abs() < 1e-6),
            other => panic!("unexpected answer: {other:?}"),
        }
    }

    #[test]
    fn test_top_state_and_comparisons() {
        let report = report();

        let state = report.answer(QuestionId::HighestPayingTechState).unwrap();
        assert_eq!(
            state.answer_value,
            AnswerValue::TopGroup {
                group: "WA".to_string(),
                usd: 135_000.0
            }
        );
        assert_eq!(state.sample_size, 5);
        assert_eq!(state.supporting.len(), 2);
        assert_eq!(state.supporting[1].group_key, "CA");

        // men 100k..140k (median 120k), women 105k..145k (median 125k)
        match &report.answer(QuestionId::GenderGapTech).unwrap().answer_value {
            AnswerValue::Percent { value } => assert!((value + 4.0).abs() < 1e-9),
            other => panic!("unexpected answer: {other:?}"),
        }
        match &report
            .answer(QuestionId::EducationPremiumMasters)
            .unwrap()
            .answer_value
        {
            AnswerValue::Percent { value } => assert!((value - 4.166_666).abs() < 1e-3),
            other => panic!("unexpected answer: {other:?}"),
        }
    }

    #[test]
    fn test_question_without_data_is_undefined() {
        let report = report();
        let industry = report
            .answer(QuestionId::HighestPayingNonTechIndustry)
            .unwrap();

        assert!(!industry.answer_value.is_defined());
        assert_eq!(industry.sample_size, 0);
        assert!(report.low_confidence().contains(&QuestionId::HighestPayingNonTechIndustry));
    }

    #[test]
    fn test_report_is_idempotent() {
        assert_eq!(report(), report());
    }

    #[test]
    fn test_report_serializes_question_ids() {
        let json = serde_json::to_value(report()).unwrap();
        let answers = json["answers"].as_object().unwrap();

        for id in QuestionId::ALL {
            assert!(answers.contains_key(id.as_str()), "missing {}", id);
        }
        assert_eq!(
            json["answers"]["software_engineer_median_us"]["answer_value"]["kind"],
            "amount"
        );
    }
}
