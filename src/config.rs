// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::models::JobCategory;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Years added to the lower bound of an open-ended experience bucket ("10+ years").
/// The survey gives no upper bound for these buckets, so this is an assumption, not a
/// measured value. Override with `analysis.open_ended_offset_years`.
pub const DEFAULT_OPEN_ENDED_OFFSET_YEARS: f64 = 2.5;

pub const DEFAULT_MIN_SALARY_USD: f64 = 10_000.0;
pub const DEFAULT_MAX_SALARY_USD: f64 = 2_000_000.0;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub currency: CurrencyConfig,
    pub classification: ClassificationConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    pub min_salary_usd: f64,
    pub max_salary_usd: f64,
    pub open_ended_offset_years: f64,
    /// Sample size at or above which a result is High confidence.
    pub high_confidence_min: usize,
    /// Sample size at or above which a result is Medium confidence.
    pub medium_confidence_min: usize,
    pub min_state_group_size: usize,
    pub min_industry_group_size: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CurrencyConfig {
    pub reference_year: u16,
    /// Units of USD per one unit of the keyed currency.
    pub rates: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub rules: Vec<KeywordRule>,
    #[serde(default)]
    pub software_engineer_titles: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTarget {
    Title,
    Industry,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct KeywordRule {
    pub pattern: String,
    pub target: MatchTarget,
    pub category: JobCategory,
    pub priority: u16,
}

impl KeywordRule {
    pub fn new(pattern: &str, target: MatchTarget, category: JobCategory, priority: u16) -> Self {
        Self {
            pattern: pattern.to_string(),
            target,
            category,
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
    #[serde(default)]
    pub show_progress: bool,
}

const TECH_INDUSTRY_PRIORITY: u16 = 100;
const TECH_TITLE_PRIORITY: u16 = 50;

const TECH_INDUSTRY_KEYWORDS: &[&str] = &["computing or tech", "technology", "software"];

const TECH_TITLE_KEYWORDS: &[&str] = &[
    "software",
    "developer",
    "engineer",
    "programmer",
    "analyst",
    "architect",
    "data scientist",
    "data engineer",
    "devops",
    "sre",
    "site reliability",
    "product manager",
    "technical",
    "systems",
    "network",
    "security",
    "machine learning",
    "ml engineer",
    "ai engineer",
    "backend",
    "frontend",
    "full stack",
    "mobile developer",
    "ios",
    "android",
    "web developer",
    "cloud engineer",
    "platform engineer",
    "infrastructure",
];

const SOFTWARE_ENGINEER_TITLES: &[&str] = &[
    "software engineer",
    "software developer",
    "programmer",
    "developer",
    "software architect",
    "software lead",
    "senior software",
    "principal software",
    "staff software",
    "software specialist",
    "software analyst",
];

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SALARY_INSIGHTS")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        let mut rules: Vec<KeywordRule> = TECH_INDUSTRY_KEYWORDS
            .iter()
            .map(|kw| {
                KeywordRule::new(
                    kw,
                    MatchTarget::Industry,
                    JobCategory::Tech,
                    TECH_INDUSTRY_PRIORITY,
                )
            })
            .collect();
        rules.extend(TECH_TITLE_KEYWORDS.iter().map(|kw| {
            KeywordRule::new(kw, MatchTarget::Title, JobCategory::Tech, TECH_TITLE_PRIORITY)
        }));

        Self {
            analysis: AnalysisConfig {
                min_salary_usd: DEFAULT_MIN_SALARY_USD,
                max_salary_usd: DEFAULT_MAX_SALARY_USD,
                open_ended_offset_years: DEFAULT_OPEN_ENDED_OFFSET_YEARS,
                high_confidence_min: 1000,
                medium_confidence_min: 30,
                min_state_group_size: 5,
                min_industry_group_size: 10,
            },
            currency: CurrencyConfig {
                reference_year: 2021,
                rates: BTreeMap::from([
                    ("USD".to_string(), 1.0),
                    ("GBP".to_string(), 1.38),
                    ("CAD".to_string(), 0.80),
                    ("EUR".to_string(), 1.18),
                    ("AUD".to_string(), 0.75),
                ]),
            },
            classification: ClassificationConfig {
                rules,
                software_engineer_titles: SOFTWARE_ENGINEER_TITLES
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            pipeline: PipelineConfig {
                parallel_workers: 4,
                show_progress: false,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(PipelineError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        let analysis = &self.analysis;
        if !(analysis.min_salary_usd > 0.0 && analysis.min_salary_usd <= analysis.max_salary_usd) {
            return Err(PipelineError::Config(format!(
                "salary bounds must satisfy 0 < min <= max (got {} and {})",
                analysis.min_salary_usd, analysis.max_salary_usd
            )));
        }

        if !(analysis.open_ended_offset_years >= 0.0) {
            return Err(PipelineError::Config(
                "open_ended_offset_years must not be negative".to_string(),
            ));
        }

        if analysis.medium_confidence_min > analysis.high_confidence_min {
            return Err(PipelineError::Config(
                "medium_confidence_min must not exceed high_confidence_min".to_string(),
            ));
        }

        if self.currency.rates.is_empty() {
            return Err(PipelineError::Config(
                "currency rate table is empty".to_string(),
            ));
        }

        for (code, rate) in &self.currency.rates {
            if !(rate.is_finite() && *rate > 0.0) {
                return Err(PipelineError::Config(format!(
                    "rate for {} must be a positive number",
                    code
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.currency.rates.len(), 5);
        assert_eq!(config.analysis.open_ended_offset_years, 2.5);
    }

    #[test]
    fn test_industry_rules_outrank_title_rules() {
        let config = Config::default_config();
        let industry = config
            .classification
            .rules
            .iter()
            .find(|r| r.target == MatchTarget::Industry)
            .unwrap();
        let title = config
            .classification
            .rules
            .iter()
            .find(|r| r.target == MatchTarget::Title)
            .unwrap();
        assert!(industry.priority > title.priority);
    }

    #[test]
    fn test_rejects_zero_workers() {
        let mut config = Config::default_config();
        config.pipeline.parallel_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let mut config = Config::default_config();
        config.analysis.min_salary_usd = 3_000_000.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let mut config = Config::default_config();
        config.currency.rates.insert("JPY".to_string(), 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[analysis]
min_salary_usd = 10000.0
max_salary_usd = 2000000.0
open_ended_offset_years = 5.0
high_confidence_min = 1000
medium_confidence_min = 30
min_state_group_size = 5
min_industry_group_size = 10

[currency]
reference_year = 2021

[currency.rates]
USD = 1.0

[classification]
software_engineer_titles = ["software engineer"]

[[classification.rules]]
pattern = "software"
target = "industry"
category = "Tech"
priority = 100

[pipeline]
parallel_workers = 2
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.analysis.open_ended_offset_years, 5.0);
        assert_eq!(config.pipeline.parallel_workers, 2);
        assert_eq!(config.classification.rules.len(), 1);
        assert_eq!(config.classification.rules[0].target, MatchTarget::Industry);
    }
}
