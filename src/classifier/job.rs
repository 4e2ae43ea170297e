// file: src/classifier/job.rs
// description: job category classification from title and industry text
// reference: configurable keyword rules evaluated in priority order

use crate::config::{ClassificationConfig, KeywordRule, MatchTarget};
use crate::models::JobCategory;
use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Result of classifying one (title, industry) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: JobCategory,
    /// Index into the configured rule list of the rule that decided the category.
    pub matched_rule: Option<usize>,
    /// No rule matched and the NonTech fallback was applied.
    pub defaulted: bool,
    /// Some industry rule with a Tech category matched.
    pub tech_industry: bool,
    pub software_engineer: bool,
}

struct CompiledRule {
    index: usize,
    rule: KeywordRule,
    regex: Regex,
}

impl CompiledRule {
    fn matches(&self, title: &str, industry: &str) -> bool {
        match self.rule.target {
            MatchTarget::Title => self.regex.is_match(title),
            MatchTarget::Industry => self.regex.is_match(industry),
        }
    }
}

pub struct JobClassifier {
    rules: Vec<CompiledRule>,
    software_engineer: Vec<Regex>,
}

impl JobClassifier {
    pub fn new(config: &ClassificationConfig) -> Self {
        let mut rules: Vec<CompiledRule> = config
            .rules
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                keyword_regex(&rule.pattern).map(|regex| CompiledRule {
                    index,
                    rule: rule.clone(),
                    regex,
                })
            })
            .collect();

        // Stable: equal priorities keep their declared order.
        rules.sort_by(|a, b| b.rule.priority.cmp(&a.rule.priority));

        let software_engineer = config
            .software_engineer_titles
            .iter()
            .filter_map(|kw| keyword_regex(kw))
            .collect();

        Self {
            rules,
            software_engineer,
        }
    }

    /// Category only. Never fails; unmatched input is NonTech.
    pub fn classify(&self, title: &str, industry: &str) -> JobCategory {
        self.classify_detailed(title, industry).category
    }

    /// The highest-priority matching rule decides the category.
    pub fn classify_detailed(&self, title: &str, industry: &str) -> Classification {
        let winner = self.rules.iter().find(|r| r.matches(title, industry));

        let tech_industry = self.rules.iter().any(|r| {
            r.rule.target == MatchTarget::Industry
                && r.rule.category == JobCategory::Tech
                && r.regex.is_match(industry)
        });

        let software_engineer = self.software_engineer.iter().any(|re| re.is_match(title));

        match winner {
            Some(rule) => Classification {
                category: rule.rule.category,
                matched_rule: Some(rule.index),
                defaulted: false,
                tech_industry,
                software_engineer,
            },
            None => Classification {
                category: JobCategory::NonTech,
                matched_rule: None,
                defaulted: true,
                tech_industry,
                software_engineer,
            },
        }
    }
}

impl Default for JobClassifier {
    fn default() -> Self {
        Self::new(&crate::config::Config::default_config().classification)
    }
}

/// Case-insensitive match anchored at a word start, so "engineer" matches "Engineering"
/// but "ios" does not match "bios".
fn keyword_regex(keyword: &str) -> Option<Regex> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return None;
    }

    let pattern = format!(r"\b{}", regex::escape(keyword));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Skipping classification keyword {:?}: {}", keyword, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn classifier() -> JobClassifier {
        JobClassifier::default()
    }

    #[test]
    fn test_title_keyword_is_tech() {
        let c = classifier();
        assert_eq!(c.classify("Senior Software Engineer", "Retail"), JobCategory::Tech);
        assert_eq!(c.classify("Data Scientist", "Health care"), JobCategory::Tech);
    }

    #[test]
    fn test_industry_wins_regardless_of_title() {
        let c = classifier();
        let result = c.classify_detailed("Office Manager", "Computing or Tech");
        assert_eq!(result.category, JobCategory::Tech);
        assert!(result.tech_industry);
        assert!(!result.defaulted);
    }

    #[test]
    fn test_no_match_defaults_to_non_tech() {
        let c = classifier();
        let result = c.classify_detailed("Librarian", "Education (Higher Education)");
        assert_eq!(result.category, JobCategory::NonTech);
        assert!(result.defaulted);
        assert_eq!(result.matched_rule, None);
    }

    #[test]
    fn test_word_start_matching() {
        let c = classifier();
        assert_eq!(c.classify("Engineering Manager", ""), JobCategory::Tech);
        assert_eq!(c.classify("Bios instructor", ""), JobCategory::NonTech);
        assert_eq!(c.classify("", ""), JobCategory::NonTech);
    }

    #[test]
    fn test_software_engineer_flag() {
        let c = classifier();
        assert!(c.classify_detailed("Staff Software Engineer", "").software_engineer);
        assert!(!c.classify_detailed("Data Analyst", "").software_engineer);
    }

    #[test]
    fn test_priority_then_declaration_order() {
        let config = ClassificationConfig {
            rules: vec![
                KeywordRule::new("manager", MatchTarget::Title, JobCategory::NonTech, 10),
                KeywordRule::new("product", MatchTarget::Title, JobCategory::Tech, 10),
                KeywordRule::new("bank", MatchTarget::Industry, JobCategory::NonTech, 20),
            ],
            software_engineer_titles: vec![],
        };
        let c = JobClassifier::new(&config);

        let result = c.classify_detailed("Product Manager", "Tech");
        assert_eq!(result.category, JobCategory::NonTech);
        assert_eq!(result.matched_rule, Some(0));

        let result = c.classify_detailed("Product Manager", "Banking");
        assert_eq!(result.matched_rule, Some(2));
        assert!(!result.tech_industry);
    }

    #[test]
    fn test_deterministic() {
        let c = JobClassifier::new(&Config::default_config().classification);
        let a = c.classify_detailed("Backend Developer", "Media & Digital");
        let b = c.classify_detailed("Backend Developer", "Media & Digital");
        assert_eq!(a, b);
    }
}
